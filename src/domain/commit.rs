/// Separator between the hash, subject and body fields of a log entry.
pub const FIELD_SEPARATOR: &str = "@-@-@-@-@";

/// Separator between log entries in a multi-commit log stream.
pub const ENTRY_SEPARATOR: &str = "-@-@-@-@-@-@-@-@";

/// A single commit as reported by version control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub subject: String,
    pub body: Option<String>,
}

impl CommitRecord {
    /// Create a commit record directly from its parts
    pub fn new(hash: impl Into<String>, subject: impl Into<String>, body: Option<String>) -> Self {
        CommitRecord {
            hash: hash.into(),
            subject: subject.into(),
            body,
        }
    }

    /// Parse a delimited log entry of the form `hash SEP subject [SEP body]`.
    ///
    /// Each field is trimmed. Two fields give a commit without a body, three fields
    /// give a commit whose body may be empty. Any other field count is malformed
    /// and yields `None`.
    pub fn parse(raw: &str, separator: &str) -> Option<Self> {
        let fields: Vec<&str> = raw.split(separator).map(str::trim).collect();

        match fields.as_slice() {
            [hash, subject] => Some(CommitRecord::new(*hash, *subject, None)),
            [hash, subject, body] => {
                Some(CommitRecord::new(*hash, *subject, Some(body.to_string())))
            }
            _ => None,
        }
    }

    /// Render this commit back into the delimited log entry format
    pub fn to_log_entry(&self, separator: &str) -> String {
        match &self.body {
            Some(body) => format!(
                "{} {} {} {} {}",
                self.hash, separator, self.subject, separator, body
            ),
            None => format!("{} {} {}", self.hash, separator, self.subject),
        }
    }
}

/// Split a multi-entry log stream and parse each entry, dropping malformed ones
pub fn parse_log(log: &str) -> Vec<CommitRecord> {
    log.split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| CommitRecord::parse(entry, FIELD_SEPARATOR))
        .collect()
}
