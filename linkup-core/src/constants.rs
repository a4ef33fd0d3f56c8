/// Maximum number of events requested from the remote source per query.
pub const REMOTE_QUERY_LIMIT: usize = 300;

/// Field the remote query is ordered by (ascending).
pub const REMOTE_ORDER_BY: &str = "dateTime";

/// Name of the remote document collection holding events.
pub const REMOTE_EVENTS_COLLECTION: &str = "events";

/// Prefix of ids assigned to events created on this device.
pub const LOCAL_ID_PREFIX: &str = "local_";

/// Prefix of the URL fragment identifying a shared event.
pub const SHARE_FRAGMENT_PREFIX: &str = "event-";
