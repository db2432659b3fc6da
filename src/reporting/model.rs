use serde::Serialize;

/// Outcome of one sqlmap run against a single target/parameter pair.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ScanResult {
    pub target: String,
    pub param: String,
    pub status: Status,
    pub dbms: String,
    pub os: String,
    pub webapp_techs: String,
    pub techniques: String, // newline-joined "Type | Title | Payload"
}

impl ScanResult {
    /// Result for a target sqlmap did not flag.
    pub fn not_vulnerable(target: &str, param: &str) -> Self {
        Self {
            target: target.to_string(),
            param: param.to_string(),
            status: Status::NotVulnerable,
            dbms: String::new(),
            os: String::new(),
            webapp_techs: String::new(),
            techniques: String::new(),
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        self.status == Status::Vulnerable
    }

    /// Number of distinct injection techniques sqlmap reported.
    pub fn technique_count(&self) -> usize {
        self.techniques.lines().filter(|l| !l.trim().is_empty()).count()
    }

    /// Column values in report order.
    pub fn record(&self) -> [&str; 7] {
        [
            &self.target,
            &self.param,
            self.status.as_str(),
            &self.dbms,
            &self.os,
            &self.webapp_techs,
            &self.techniques,
        ]
    }
}

pub const RECORD_HEADER: [&str; 7] = [
    "target",
    "param",
    "status",
    "dbms",
    "os",
    "webapp_techs",
    "techniques",
];

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "VULNERABLE")]
    Vulnerable,
    #[serde(rename = "NOT VULNERABLE")]
    NotVulnerable,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Vulnerable => "VULNERABLE",
            Status::NotVulnerable => "NOT VULNERABLE",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
