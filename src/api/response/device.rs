use serde::Deserialize;

/* The server sends more fields than these; only `id` and `device_id` are
 * ever read. */
#[derive(Deserialize)]
pub struct DeviceRecord {
    pub id: u64,
    pub device_id: String,
}
