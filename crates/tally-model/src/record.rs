use std::collections::BTreeMap;

/// One normalized data row: cleaned field values keyed by logical alias.
///
/// A record carries exactly the aliases a tally run needs (the union of
/// counter and constraint aliases), never the whole source row.
pub type Record = BTreeMap<String, String>;
