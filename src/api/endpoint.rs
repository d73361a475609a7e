pub type Endpoint = str;

pub const LOGIN: &Endpoint = "/api/auth/login/";
pub const DEVICES: &Endpoint = "/api/iot-devices/";
pub const DATA_UPDATE: &Endpoint = "/api/iot-devices/data/update/";

/// Path for a single device, addressed by its server-assigned numeric id.
pub fn device(id: u64) -> String {
    format!("{}{}/", DEVICES, id)
}
