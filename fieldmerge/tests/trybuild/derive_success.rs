//! Trybuild fixture exercising the derives across their supported shapes.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::net::IpAddr;
use std::time::Instant;

use fieldmerge::{Merge, Merger, ParseHydrator, Record};

#[derive(Record)]
#[fieldmerge(accessor(name = "Endpoint", with = endpoint))]
#[fieldmerge(accessor(with = checked, fallible))]
struct Env {
    #[fieldmerge(rename = "Host")]
    pub host: String,
    pub r#type: String,
    #[fieldmerge(skip)]
    pub secret: String,
    pub labels: BTreeMap<String, String>,
    internal: u8,
    #[fieldmerge(skip)]
    started: Instant,
}

impl Env {
    fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.internal)
    }

    fn checked(&self) -> Result<u8, Infallible> {
        Ok(self.internal)
    }
}

#[derive(Record)]
struct Sources {
    #[fieldmerge(rename = "EV")]
    pub env: Option<Box<Env>>,
    pub name: String,
}

#[derive(Merge)]
struct Settings<T> {
    #[fieldmerge(from = "EV.Host|EV.Endpoint")]
    host: String,
    #[fieldmerge(from = "EV.type")]
    r#type: Option<String>,
    #[fieldmerge(from = "EV.labels.zone,skipzero")]
    zone: String,
    #[fieldmerge(from = "EV.Host")]
    address: Option<IpAddr>,
    #[fieldmerge(from = "EV.Host,hydrate")]
    parsed: Option<T>,
    #[fieldmerge(from = "EV.labels.weight, hydrate")]
    weight: T,
    #[fieldmerge(from = "EV.checked")]
    checked: u8,
    #[fieldmerge(from = "extra")]
    extra: Option<T>,
    untagged: Vec<T>,
}

fn main() {
    let sources = Sources {
        env: Some(Box::new(Env {
            host: String::from("127.0.0.1"),
            r#type: String::from("primary"),
            secret: String::new(),
            labels: BTreeMap::new(),
            internal: 1,
            started: Instant::now(),
        })),
        name: String::from("local"),
    };
    let mut settings = Settings::<u32> {
        host: String::new(),
        r#type: None,
        zone: String::new(),
        address: None,
        parsed: None,
        weight: 0,
        checked: 0,
        extra: None,
        untagged: Vec::new(),
    };
    let merger = Merger::new().with_hydrator(ParseHydrator::new().register::<u32>());
    let _: fieldmerge::MergeResult<()> = merger.merge(&mut settings, &sources);
    let _ = (sources.name.len(), settings.untagged.len());
}
