//! Trybuild fixture verifying `#[fieldmerge(crate = "...")]` works with a
//! dependency renamed via `use ... as`.

use fieldmerge as merge_engine;
use merge_engine::{Merge, Record};

#[derive(Record)]
#[fieldmerge(crate = "merge_engine")]
struct Sources {
    #[fieldmerge(rename = "URL")]
    pub url: String,
}

#[derive(Default, Merge)]
#[fieldmerge(crate = "merge_engine")]
struct Settings {
    #[fieldmerge(from = "URL")]
    url: String,
}

fn main() {
    let sources = Sources {
        url: String::from("https://example.test"),
    };
    let mut settings = Settings::default();
    let result = merge_engine::merge(&mut settings, &sources);
    let _: merge_engine::MergeResult<()> = result;
    let _ = settings.url;
}
