//! Scraping of sqlmap console output.
//!
//! sqlmap has no machine-readable result channel when driven from the
//! command line, so everything here works on the human-readable transcript.
//! Matching is line-oriented and case-insensitive unless noted.

use crate::reporting::model::{ScanResult, Status};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Phrases that show up when the session cookie no longer authenticates and
/// the target bounces sqlmap to a login or message page.
pub const REDIRECT_KEYWORDS: &[&str] = &[
    "got a 302 redirect to",
    "rdPage.aspx?rdReport=Messages.Success",
];

/// Present (case-sensitive) only when sqlmap identified an injection point.
pub const VULNERABLE_MARKER: &str = "back-end DBMS";

pub const DBMS_KEYWORD: &str = "back-end DBMS";
pub const OS_KEYWORD: &str = "operating system";
pub const WEBAPP_KEYWORD: &str = "web application technology";

const TECHNIQUE_PREFIX: &str = "Type:";

fn keyword_pattern(keywords: &[&str]) -> Regex {
    let alternation = keywords
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .expect("escaped keywords form a valid pattern")
}

static REDIRECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(REDIRECT_KEYWORDS));

pub static DBMS_FIELD: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(&[DBMS_KEYWORD]));
pub static OS_FIELD: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(&[OS_KEYWORD]));
pub static WEBAPP_FIELD: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(&[WEBAPP_KEYWORD]));

/// True when any redirect keyword appears anywhere in the output.
pub fn has_redirect_warning(output: &str) -> bool {
    REDIRECT_PATTERN.is_match(output)
}

/// Value of the first line matching `field`: the text after the first
/// colon, trimmed. Empty when no line matches or the line has no colon.
pub fn extract_line(output: &str, field: &Regex) -> String {
    output
        .lines()
        .find(|line| field.is_match(line))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Collects sqlmap's injection point blocks:
///
/// ```text
///     Type: boolean-based blind
///     Title: AND boolean-based blind - WHERE or HAVING clause
///     Payload: id=1 AND 5240=5240
/// ```
///
/// Each block becomes `"<type> | <title> | <payload>"`; blocks are joined
/// with newlines. A block cut short by the end of output gets empty parts.
pub fn extract_techniques(output: &str) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let mut techniques = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let type_line = lines[i].trim();
        if type_line.starts_with(TECHNIQUE_PREFIX) {
            let title_line = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");
            let payload_line = lines.get(i + 2).map(|l| l.trim()).unwrap_or("");
            techniques.push(format!("{} | {} | {}", type_line, title_line, payload_line));
            i += 3;
        } else {
            i += 1;
        }
    }

    techniques.join("\n")
}

pub fn is_vulnerable(output: &str) -> bool {
    output.contains(VULNERABLE_MARKER)
}

/// Turn a finished transcript into a result row.
pub fn classify(target: &str, param: &str, output: &str) -> ScanResult {
    if !is_vulnerable(output) {
        return ScanResult::not_vulnerable(target, param);
    }

    ScanResult {
        target: target.to_string(),
        param: param.to_string(),
        status: Status::Vulnerable,
        dbms: extract_line(output, &DBMS_FIELD),
        os: extract_line(output, &OS_FIELD),
        webapp_techs: extract_line(output, &WEBAPP_FIELD),
        techniques: extract_techniques(output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VULNERABLE_RUN: &str = "\
sqlmap identified the following injection point(s) with a total of 46 HTTP(s) requests:
---
Parameter: id (GET)
    Type: boolean-based blind
    Title: AND boolean-based blind - WHERE or HAVING clause
    Payload: id=1 AND 5240=5240

    Type: time-based blind
    Title: MySQL >= 5.0.12 AND time-based blind (query SLEEP)
    Payload: id=1 AND (SELECT 3385 FROM (SELECT(SLEEP(5)))xYzA)
---
web server operating system: Linux Ubuntu 20.04 or 20.10 or 19.10 (focal or eoan)
web application technology: Apache 2.4.41, PHP
back-end DBMS: MySQL >= 5.0.12
";

    const CLEAN_RUN: &str = "\
[WARNING] GET parameter 'q' does not seem to be injectable
[CRITICAL] all tested parameters do not appear to be injectable. Try to increase values for '--level'/'--risk' options
";

    #[test]
    fn test_classify_vulnerable_run() {
        let r = classify("http://shop.local/item.php?id=1", "id", VULNERABLE_RUN);
        assert_eq!(r.status, Status::Vulnerable);
        assert_eq!(r.dbms, "MySQL >= 5.0.12");
        assert_eq!(r.os, "Linux Ubuntu 20.04 or 20.10 or 19.10 (focal or eoan)");
        assert_eq!(r.webapp_techs, "Apache 2.4.41, PHP");
        assert_eq!(r.technique_count(), 2);
        assert!(r.techniques.starts_with(
            "Type: boolean-based blind | Title: AND boolean-based blind - WHERE or HAVING clause | Payload: id=1 AND 5240=5240\n"
        ));
    }

    #[test]
    fn test_classify_clean_run() {
        let r = classify("http://shop.local/search?q=a", "q", CLEAN_RUN);
        assert_eq!(r, ScanResult::not_vulnerable("http://shop.local/search?q=a", "q"));
    }

    #[test]
    fn test_vulnerable_marker_is_case_sensitive() {
        assert!(!is_vulnerable("BACK-END DBMS: MySQL"));
        assert!(is_vulnerable("the back-end DBMS is MySQL"));
    }

    #[test]
    fn test_extract_line_is_case_insensitive() {
        assert_eq!(extract_line("Back-End dbms: Oracle", &DBMS_FIELD), "Oracle");
    }

    #[test]
    fn test_extract_line_first_colon_only() {
        let out = "web application technology: ASP.NET 4.0.30319, Microsoft IIS 10.0: extra";
        assert_eq!(
            extract_line(out, &WEBAPP_FIELD),
            "ASP.NET 4.0.30319, Microsoft IIS 10.0: extra"
        );
    }

    #[test]
    fn test_extract_line_without_colon_or_match() {
        assert_eq!(extract_line("the back-end DBMS is MySQL", &DBMS_FIELD), "");
        assert_eq!(extract_line("nothing here", &DBMS_FIELD), "");
    }

    #[test]
    fn test_extract_line_first_match_wins() {
        let out = "back-end DBMS operating system: Windows\nweb server operating system: Linux";
        assert_eq!(extract_line(out, &OS_FIELD), "Windows");
    }

    #[test]
    fn test_truncated_technique_block() {
        let out = "    Type: stacked queries\n    Title: PostgreSQL > 8.1 stacked queries";
        assert_eq!(
            extract_techniques(out),
            "Type: stacked queries | Title: PostgreSQL > 8.1 stacked queries | "
        );
        assert_eq!(extract_techniques("Type: error-based"), "Type: error-based |  | ");
    }

    #[test]
    fn test_technique_block_consumes_three_lines() {
        // A "Type:" line inside a consumed block is not treated as a new block.
        let out = "Type: A\nType: B\nPayload: x\nType: C\nTitle: c\nPayload: y";
        assert_eq!(
            extract_techniques(out),
            "Type: A | Type: B | Payload: x\nType: C | Title: c | Payload: y"
        );
    }

    #[test]
    fn test_type_prefix_is_case_sensitive() {
        assert_eq!(extract_techniques("type: lowercase\nTitle: t\nPayload: p"), "");
    }

    #[test]
    fn test_redirect_warning() {
        assert!(has_redirect_warning(
            "got a 302 redirect to 'https://app.local/login.aspx'. Do you want to follow? [Y/n] Y"
        ));
        assert!(has_redirect_warning("GOT A 302 REDIRECT TO '/'"));
        assert!(has_redirect_warning(
            "redirect to /rdpage.aspx?rdreport=messages.success detected"
        ));
        assert!(!has_redirect_warning("got a 301 redirect to '/'"));
        assert!(!has_redirect_warning(VULNERABLE_RUN));
    }

    #[test]
    fn test_keywords_match_literally() {
        // '.' and '?' in the keywords are not regex metacharacters.
        assert!(!has_redirect_warning("rdPageXaspx?rdReport=MessagesXSuccess"));
        assert!(!has_redirect_warning("rdPage.asprdReport=Messages.Success"));
        assert!(has_redirect_warning("see rdPage.aspx?rdReport=Messages.Success"));
        assert!(WEBAPP_FIELD.is_match("WEB APPLICATION TECHNOLOGY: PHP"));
        assert!(!OS_FIELD.is_match("operatingXsystem: Linux"));
    }
}
