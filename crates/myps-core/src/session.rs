/// Snapshot of one live server-side session at listing time.
///
/// The session may already be gone by the time an action runs against it.
/// Nullable text columns are coalesced to `""` by the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: u64,
    pub user: String,
    pub host: String,
    pub db: String,
    pub command: String,
    pub elapsed_seconds: i64,
    pub state: String,
    pub info: String,
}
