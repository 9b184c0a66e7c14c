//! End-to-end merges from layered environment and file sources.
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface merge mistakes"
)]

use std::collections::HashMap;
use std::num::ParseIntError;

use anyhow::{Result, anyhow, ensure};
use fieldmerge::{ErrorKind, Merge, MergeError, Merger, ParseHydrator, Record, Reflect, merge};
use rstest::{fixture, rstest};

#[derive(Debug, Default, Record)]
struct Sources {
    #[fieldmerge(rename = "EV")]
    pub env: Option<Box<EnvVars>>,
    #[fieldmerge(rename = "FV")]
    pub file: Option<FileVals>,
}

#[derive(Debug, Default, Record)]
#[fieldmerge(accessor(name = "GetValue", with = get_value))]
#[fieldmerge(accessor(name = "CheckedPort", with = checked_port, fallible))]
#[fieldmerge(accessor(name = "MaybeURL", with = maybe_url))]
struct EnvVars {
    #[fieldmerge(rename = "AISvcURL")]
    pub ai_svc_url: String,
    #[fieldmerge(rename = "AISvcKey")]
    pub ai_svc_key: String,
    #[fieldmerge(rename = "Nil")]
    pub nil: Option<NilBranch>,
    #[fieldmerge(rename = "Count")]
    pub count: i64,
    #[fieldmerge(rename = "URL")]
    pub url: Option<String>,
    #[fieldmerge(rename = "Data")]
    pub data: HashMap<String, String>,
    #[fieldmerge(rename = "Value")]
    pub value: String,
    #[fieldmerge(rename = "IntMap")]
    pub int_map: HashMap<i32, String>,
    #[fieldmerge(rename = "Users")]
    pub users: Vec<String>,
    #[fieldmerge(rename = "Port")]
    pub port: String,
}

impl EnvVars {
    fn get_value(&self) -> String {
        String::from("method value")
    }

    fn checked_port(&self) -> Result<u16, ParseIntError> {
        self.port.parse()
    }

    fn maybe_url(&self) -> Option<String> {
        self.url.clone()
    }
}

#[derive(Debug, Default, Record)]
struct NilBranch {
    #[fieldmerge(rename = "URL")]
    pub url: String,
}

#[derive(Debug, Default, Record)]
struct FileVals {
    #[fieldmerge(rename = "Service")]
    pub service: FileValsService,
    #[fieldmerge(rename = "Count")]
    pub count: i64,
}

#[derive(Debug, Default, Record)]
struct FileValsService {
    #[fieldmerge(rename = "URL")]
    pub url: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq, Merge)]
struct Config {
    #[fieldmerge(from = "EV.AISvcURL|FV.Service.URL")]
    ai_svc_url: String,
    #[fieldmerge(from = "EV.AISvcKey")]
    ai_svc_key: String,
    extra: String,
    no_tag: String,
}

fn env(vars: EnvVars) -> Option<Box<EnvVars>> {
    Some(Box::new(vars))
}

fn file_url(url: &str) -> Option<FileVals> {
    Some(FileVals {
        service: FileValsService {
            url: Some(url.to_owned()),
        },
        count: 0,
    })
}

#[fixture]
fn layered() -> Sources {
    Sources {
        env: env(EnvVars {
            ai_svc_url: String::from("env-url"),
            ai_svc_key: String::from("env-key"),
            ..EnvVars::default()
        }),
        file: file_url("file-url"),
    }
}

fn expected_layered() -> Config {
    Config {
        ai_svc_url: String::from("file-url"),
        ai_svc_key: String::from("env-key"),
        ..Config::default()
    }
}

#[rstest]
fn later_alternatives_win(layered: Sources) -> Result<()> {
    let mut config = Config::default();
    merge(&mut config, &layered)?;
    ensure!(config == expected_layered(), "unexpected config {config:?}");
    Ok(())
}

#[rstest]
fn boxed_and_optional_sources_are_unwrapped(layered: Sources) -> Result<()> {
    let boxed = Box::new(layered);
    let mut from_box = Config::default();
    merge(&mut from_box, &boxed)?;
    ensure!(from_box == expected_layered());

    let optional = Some(*boxed);
    let mut from_option = Config::default();
    merge(&mut from_option, &optional)?;
    ensure!(from_option == expected_layered());
    Ok(())
}

#[rstest]
fn absent_source_is_rejected_without_side_effects() {
    let mut config = Config {
        extra: String::from("kept"),
        ..Config::default()
    };
    let before = Config {
        extra: String::from("kept"),
        ..Config::default()
    };
    let err = merge(&mut config, &None::<Sources>).expect_err("absent source");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err, MergeError::InvalidSource { .. }));
    assert_eq!(config, before);
}

#[rstest]
fn absent_branches_do_not_contribute() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            ai_svc_key: String::from("env-key"),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = Config::default();
    merge(&mut config, &sources)?;
    ensure!(
        config
            == Config {
                ai_svc_key: String::from("env-key"),
                ..Config::default()
            }
    );
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigNilPath {
    #[fieldmerge(from = "EV.Nil.URL")]
    nil_path: String,
}

#[rstest]
fn unset_intermediate_optional_short_circuits() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars::default()),
        file: None,
    };
    let mut config = ConfigNilPath {
        nil_path: String::from("untouched"),
    };
    merge(&mut config, &sources)?;
    ensure!(config.nil_path == "untouched");
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigPointer {
    #[fieldmerge(from = "EV.URL|FV.Service.URL")]
    url: Option<String>,
}

#[rstest]
#[case::both_unset(None, None, None)]
#[case::env_only(Some("env"), None, Some("env"))]
#[case::file_wins(Some("env"), Some("file"), Some("file"))]
fn optional_destinations(
    #[case] env_url: Option<&str>,
    #[case] file: Option<&str>,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            url: env_url.map(str::to_owned),
            ..EnvVars::default()
        }),
        file: Some(FileVals {
            service: FileValsService {
                url: file.map(str::to_owned),
            },
            count: 0,
        }),
    };
    let mut config = ConfigPointer::default();
    merge(&mut config, &sources)?;
    ensure!(config.url.as_deref() == expected, "got {:?}", config.url);
    Ok(())
}

#[rstest]
fn unmatched_optional_destinations_are_unset() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars::default()),
        file: None,
    };
    let mut config = ConfigPointer {
        url: Some(String::from("stale")),
    };
    merge(&mut config, &sources)?;
    ensure!(config.url.is_none(), "got {:?}", config.url);
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigOptionalAccessor {
    #[fieldmerge(from = "EV.MaybeURL")]
    url: String,
    #[fieldmerge(from = "EV.MaybeURL")]
    maybe: Option<String>,
}

#[rstest]
fn optional_accessor_results_are_unwrapped() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            url: Some(String::from("env-url")),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigOptionalAccessor::default();
    merge(&mut config, &sources)?;
    ensure!(config.url == "env-url", "url: {}", config.url);
    ensure!(config.maybe.as_deref() == Some("env-url"), "maybe: {:?}", config.maybe);
    Ok(())
}

#[rstest]
fn absent_accessor_results_are_not_applicable() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars::default()),
        file: None,
    };
    let mut config = ConfigOptionalAccessor {
        url: String::from("kept"),
        maybe: Some(String::from("stale")),
    };
    merge(&mut config, &sources)?;
    ensure!(config.url == "kept", "url: {}", config.url);
    ensure!(config.maybe.is_none(), "maybe: {:?}", config.maybe);
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigMap {
    #[fieldmerge(from = "EV.Data.key")]
    value: String,
    #[fieldmerge(from = "EV.IntMap.7")]
    numbered: String,
    #[fieldmerge(from = "EV.Users.1")]
    second_user: String,
}

#[rstest]
fn maps_and_sequences_are_addressed_by_segment() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            data: HashMap::from([(String::from("key"), String::from("value"))]),
            int_map: HashMap::from([(7, String::from("seven"))]),
            users: vec![String::from("ada"), String::from("grace")],
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigMap::default();
    merge(&mut config, &sources)?;
    ensure!(config.value == "value");
    ensure!(config.numbered == "seven");
    ensure!(config.second_user == "grace");
    Ok(())
}

#[rstest]
fn missing_keys_and_indices_leave_fields_untouched() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            data: HashMap::from([(String::from("other"), String::from("value"))]),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigMap {
        value: String::from("default"),
        numbered: String::from("default"),
        second_user: String::from("default"),
    };
    merge(&mut config, &sources)?;
    ensure!(config.value == "default");
    ensure!(config.numbered == "default");
    ensure!(config.second_user == "default");
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigBadKey {
    #[fieldmerge(from = "EV.IntMap.seven")]
    value: String,
}

#[rstest]
fn unconvertible_map_keys_abort() {
    let sources = Sources {
        env: env(EnvVars::default()),
        file: None,
    };
    let mut config = ConfigBadKey::default();
    let err = merge(&mut config, &sources).expect_err("segment is not an i32");
    assert_eq!(err.kind(), ErrorKind::InvalidKey);
    assert_eq!(err.context().map(|ctx| ctx.field), Some("value"));
}

#[derive(Debug, Default, Merge)]
struct ConfigMethod {
    #[fieldmerge(from = "EV.GetValue")]
    value: String,
    #[fieldmerge(from = "EV.CheckedPort")]
    port: u16,
}

#[rstest]
fn accessors_supply_values() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            value: String::from("struct value"),
            port: String::from("8443"),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigMethod::default();
    merge(&mut config, &sources)?;
    ensure!(config.value == "method value");
    ensure!(config.port == 8443);
    Ok(())
}

#[rstest]
fn failing_accessors_abort() {
    let sources = Sources {
        env: env(EnvVars {
            port: String::from("not-a-port"),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigMethod::default();
    let err = merge(&mut config, &sources).expect_err("port does not parse");
    assert_eq!(err.kind(), ErrorKind::Accessor);
    assert!(matches!(
        err,
        MergeError::Accessor { ref accessor, .. } if accessor == "CheckedPort"
    ));
    assert_eq!(config.value, "method value", "earlier fields keep their values");
}

#[derive(Debug, Default, Merge)]
struct ConfigSkipZero {
    #[fieldmerge(from = "EV.Count|FV.Count,skipzero")]
    count: i64,
}

#[rstest]
#[case::all_zero(0, 0, 5, 5)]
#[case::file_non_zero(0, 42, 5, 42)]
#[case::env_survives_zero_file(7, 0, 5, 7)]
fn skipzero_ignores_zero_values(
    #[case] env_count: i64,
    #[case] file_count: i64,
    #[case] initial: i64,
    #[case] expected: i64,
) -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            count: env_count,
            ..EnvVars::default()
        }),
        file: Some(FileVals {
            count: file_count,
            ..FileVals::default()
        }),
    };
    let mut config = ConfigSkipZero { count: initial };
    merge(&mut config, &sources)?;
    ensure!(config.count == expected, "got {}", config.count);
    Ok(())
}

#[derive(Debug, Default, Record)]
struct Counter {
    pub label: String,
    hits: u32,
    #[fieldmerge(skip)]
    pub note: String,
}

#[rstest]
#[case::empty("", 0, "", true)]
#[case::private_hits("", 3, "", false)]
#[case::public_label("svc", 0, "", false)]
#[case::skipped_note("", 0, "ignored", true)]
fn record_zero_includes_private_fields(
    #[case] label: &str,
    #[case] hits: u32,
    #[case] note: &str,
    #[case] expected: bool,
) {
    let counter = Counter {
        label: label.to_owned(),
        hits,
        note: note.to_owned(),
    };
    assert_eq!(counter.is_zero(), expected, "{counter:?}");
    assert_eq!(counter.note, note);
}

#[derive(Debug, Default, Merge)]
struct ConfigDefault {
    #[fieldmerge(from = "EV.Value|FV.Service.URL")]
    field: String,
}

#[rstest]
fn unset_later_alternative_keeps_earlier_value() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            value: String::from("overwritten"),
            ..EnvVars::default()
        }),
        file: Some(FileVals::default()),
    };
    let mut config = ConfigDefault {
        field: String::from("default"),
    };
    merge(&mut config, &sources)?;
    ensure!(config.field == "overwritten");
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigEmptyTag {
    #[fieldmerge(from = "")]
    empty: String,
}

#[derive(Debug, Default, Merge)]
struct ConfigMismatch {
    #[fieldmerge(from = "EV.Count")]
    count: u32,
}

#[derive(Debug, Default, Merge)]
struct ConfigMissingMember {
    #[fieldmerge(from = "EV.AISvcKey")]
    key: String,
    #[fieldmerge(from = "EV.Missing")]
    missing: String,
    #[fieldmerge(from = "EV.Value")]
    after: String,
}

fn failure<D: Merge + Default>(sources: &Sources) -> Result<(D, MergeError)> {
    let mut destination = D::default();
    match merge(&mut destination, sources) {
        Ok(()) => Err(anyhow!("expected the merge to fail")),
        Err(err) => Ok((destination, err)),
    }
}

#[rstest]
fn empty_tags_are_malformed(layered: Sources) -> Result<()> {
    let (_, err) = failure::<ConfigEmptyTag>(&layered)?;
    ensure!(err.kind() == ErrorKind::MalformedTag, "{err}");
    Ok(())
}

#[rstest]
fn mismatched_types_are_reported(layered: Sources) -> Result<()> {
    let (_, err) = failure::<ConfigMismatch>(&layered)?;
    ensure!(err.kind() == ErrorKind::TypeMismatch, "{err}");
    let context = err.context().ok_or_else(|| anyhow!("missing context"))?;
    ensure!(context.field == "count");
    ensure!(context.destination_type == "u32");
    ensure!(&*context.tag == "EV.Count");
    Ok(())
}

#[rstest]
fn missing_members_abort_after_earlier_fields(layered: Sources) -> Result<()> {
    let (partial, err) = failure::<ConfigMissingMember>(&layered)?;
    ensure!(err.kind() == ErrorKind::NotFound, "{err}");
    ensure!(
        matches!(err, MergeError::NotFound { ref segment, .. } if segment == "Missing"),
        "{err}"
    );
    ensure!(partial.key == "env-key", "earlier field should be merged");
    ensure!(partial.after.is_empty(), "later field should be untouched");
    Ok(())
}

#[derive(Debug, Default, Merge)]
struct ConfigHydrate {
    #[fieldmerge(from = "EV.Port,hydrate")]
    port: u16,
    #[fieldmerge(from = "EV.Count,hydrate")]
    count: i64,
}

#[rstest]
fn hydration_converts_text_only() -> Result<()> {
    let sources = Sources {
        env: env(EnvVars {
            port: String::from("8080"),
            count: 42,
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigHydrate::default();
    Merger::new()
        .with_hydrator(ParseHydrator::with_standard_types())
        .merge(&mut config, &sources)?;
    ensure!(config.port == 8080);
    ensure!(config.count == 42, "non-text values are assigned directly");
    Ok(())
}

#[rstest]
fn hydration_without_hydrator_fails() {
    let sources = Sources {
        env: env(EnvVars {
            port: String::from("8080"),
            ..EnvVars::default()
        }),
        file: None,
    };
    let mut config = ConfigHydrate::default();
    let err = merge(&mut config, &sources).expect_err("no hydrator configured");
    assert_eq!(err.kind(), ErrorKind::Hydration);
}
