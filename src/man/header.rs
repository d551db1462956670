use crate::tree::CommandRef;
use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Source label used when the caller leaves `ManHeader::source` empty.
pub const AUTO_GEN_SOURCE: &str = "Auto generated by cmddoc";

/// Environment variable pinning the generation date (seconds since the epoch).
pub const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Presentation metadata for a man page.
///
/// Empty fields are filled per page; the caller's value is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManHeader {
    pub title: String,
    pub section: String,
    pub date: Option<DateTime<Utc>>,
    pub source: String,
    pub manual: String,
}

/// Header with every default applied, owned by a single render.
pub(super) struct FilledHeader {
    pub(super) title: String,
    pub(super) section: String,
    pub(super) date: DateTime<Utc>,
    pub(super) source: String,
    pub(super) manual: String,
    pub(super) auto_gen_tag: bool,
}

impl ManHeader {
    pub(super) fn fill(&self, cmd: CommandRef<'_>) -> Result<FilledHeader> {
        let auto_gen_tag = !cmd.auto_gen_tag_disabled();
        let title = if self.title.is_empty() {
            cmd.command_path().replace(' ', "-").to_uppercase()
        } else {
            self.title.clone()
        };
        let section = if self.section.is_empty() {
            "1".to_string()
        } else {
            self.section.clone()
        };
        let source = if self.source.is_empty() && auto_gen_tag {
            AUTO_GEN_SOURCE.to_string()
        } else {
            self.source.clone()
        };
        Ok(FilledHeader {
            title,
            section,
            date: resolve_date(self.date)?,
            source,
            manual: self.manual.clone(),
            auto_gen_tag,
        })
    }
}

/// Pick the generation date: explicit value, then `SOURCE_DATE_EPOCH`, then now.
pub fn resolve_date(explicit: Option<DateTime<Utc>>) -> Result<DateTime<Utc>> {
    let epoch = std::env::var(SOURCE_DATE_EPOCH).ok();
    resolve_date_from(explicit, epoch.as_deref())
}

fn resolve_date_from(explicit: Option<DateTime<Utc>>, epoch: Option<&str>) -> Result<DateTime<Utc>> {
    if let Some(date) = explicit {
        return Ok(date);
    }
    let Some(raw) = epoch.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Utc::now());
    };
    let seconds: i64 = raw
        .parse()
        .map_err(|err| anyhow!("invalid {SOURCE_DATE_EPOCH} {raw:?}: {err}"))?;
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| anyhow!("{SOURCE_DATE_EPOCH} out of range: {raw}"))
}

/// `Jan 2006` style date for the title line.
pub(super) fn title_date(date: &DateTime<Utc>) -> String {
    date.format("%b %Y").to_string()
}

/// `2-Jan-2006` style date for the history line.
pub(crate) fn history_date(date: &DateTime<Utc>) -> String {
    date.format("%-d-%b-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Command, CommandTree};

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 1, 2, 3, 4, 5).single().expect("valid date")
    }

    #[test]
    fn explicit_date_wins_over_epoch() {
        let date = resolve_date_from(Some(fixed()), Some("0")).expect("date");
        assert_eq!(date, fixed());
    }

    #[test]
    fn epoch_is_read_as_utc_seconds() {
        let date = resolve_date_from(None, Some("1451703845")).expect("date");
        assert_eq!(date, fixed());
        assert_eq!(title_date(&date), "Jan 2016");
        assert_eq!(history_date(&date), "2-Jan-2016");
    }

    #[test]
    fn invalid_epoch_is_an_error() {
        let err = resolve_date_from(None, Some("yesterday")).expect_err("bad epoch");
        assert!(err.to_string().contains(SOURCE_DATE_EPOCH));
    }

    #[test]
    fn fill_defaults_title_section_and_source() {
        let mut tree = CommandTree::new(Command::new("root"));
        let echo = tree.add_child(tree.root_id(), Command::new("echo"));
        let header = ManHeader {
            date: Some(fixed()),
            ..ManHeader::default()
        };
        let filled = header.fill(tree.get(echo)).expect("fill");
        assert_eq!(filled.title, "ROOT-ECHO");
        assert_eq!(filled.section, "1");
        assert_eq!(filled.source, AUTO_GEN_SOURCE);
        assert!(filled.auto_gen_tag);
        assert!(header.title.is_empty());
    }

    #[test]
    fn suppressed_auto_tag_leaves_source_empty() {
        let tree = CommandTree::new(Command::new("root").disable_auto_gen_tag());
        let header = ManHeader {
            title: "Project".to_string(),
            section: "2".to_string(),
            date: Some(fixed()),
            ..ManHeader::default()
        };
        let filled = header.fill(tree.root()).expect("fill");
        assert_eq!(filled.title, "Project");
        assert_eq!(filled.section, "2");
        assert!(filled.source.is_empty());
        assert!(!filled.auto_gen_tag);
    }
}
