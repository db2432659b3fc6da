use crate::targets::Target;
use anyhow::Context;
use std::fs;
use std::path::Path;
use url::Url;

/// Parse one `url|param` line. Surrounding whitespace is dropped; the split
/// happens at the first `|`, so the parameter keeps any later pipes.
pub fn parse_target_line(line: &str) -> Option<Target> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (url, param) = line.split_once('|')?;
    Some(Target {
        url: url.to_string(),
        param: param.to_string(),
    })
}

pub fn load_targets<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Target>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read target file {}", path.display()))?;

    let mut targets = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        match parse_target_line(line) {
            Some(target) => {
                if Url::parse(&target.url).is_err() {
                    tracing::warn!(
                        "Line {}: '{}' is not an absolute URL, passing it to sqlmap anyway",
                        idx + 1,
                        target.url
                    );
                }
                targets.push(target);
            }
            None if !line.trim().is_empty() => {
                tracing::debug!("Line {}: skipping, expected url|param", idx + 1);
            }
            None => {}
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_splits_on_first_pipe() {
        assert_eq!(
            parse_target_line("  http://a.local/x.php?id=1|id \n"),
            Some(Target {
                url: "http://a.local/x.php?id=1".to_string(),
                param: "id".to_string(),
            })
        );
        assert_eq!(
            parse_target_line("http://a.local/?q=1|q|extra").map(|t| t.param),
            Some("q|extra".to_string())
        );
    }

    #[test]
    fn test_parse_keeps_inner_whitespace() {
        let t = parse_target_line("http://a.local/?q=1 | q").unwrap();
        assert_eq!(t.url, "http://a.local/?q=1 ");
        assert_eq!(t.param, " q");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_target_line(""), None);
        assert_eq!(parse_target_line("   "), None);
        assert_eq!(parse_target_line("http://a.local/?id=1"), None);
    }

    #[test]
    fn test_load_skips_bad_lines_and_keeps_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://one.local/?a=1|a").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "no pipe here").unwrap();
        writeln!(file, "relative/path?b=2|b").unwrap();
        writeln!(file, "http://three.local/?c=3|c").unwrap();

        let targets = load_targets(file.path()).unwrap();
        let params: Vec<&str> = targets.iter().map(|t| t.param.as_str()).collect();
        assert_eq!(params, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_targets("/nonexistent/targets.txt").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/targets.txt"));
    }
}
