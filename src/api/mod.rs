pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;
use response::device::DeviceRecord;
use serde_json::Value;

use std::collections::HashMap;

const AUTHORIZATION: &str = "Authorization";
const TOKEN_SCHEME: &str = "Token";

pub fn api(
    api_url: String,
    login: String,
    password: String,
    timeout: std::time::Duration,
) -> model::Api {
    model::Api {
        api_url,
        login,
        password,
        timeout,
    }
}

fn auth_header(token: &str) -> String {
    format!("{} {}", TOKEN_SCHEME, token)
}

/// Map transport-level failure (connect error, timeout, ...) to Error
fn map_request_err(error: reqwest::Error) -> Error {
    match error.status() {
        Some(http::StatusCode::UNAUTHORIZED) => Error::LoginError(error.to_string()),
        Some(status) => Error::ApiError(status, error.to_string()),
        None => Error::RequestError(error.to_string()),
    }
}

/// Turn an HTTP response into its JSON body, carrying status and body text
/// forward on non-2xx responses.
async fn read_json(response: reqwest::Response) -> Result<Value, Error> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::RequestError(format!("error reading API response: {}", e)))?;

    if !status.is_success() {
        return Err(Error::ApiError(status, text));
    }

    serde_json::from_str(&text).map_err(|e| Error::InvalidResponse(text, e.to_string()))
}

/// Authenticate and build the session used by every other operation.
/// Any failure here is fatal to the whole sequence.
pub async fn login(api: &model::Api) -> Result<model::LoggedInApi, Error> {
    let client = reqwest::ClientBuilder::new()
        .timeout(api.timeout)
        .build()
        .or(Err(Error::InternalError))?;
    let url = format!("{}{}", api.api_url, endpoint::LOGIN);

    let request_body = HashMap::from([
        ("login", api.login.to_owned()),
        ("password", api.password.to_owned()),
    ]);

    let response = client
        .post(url)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| Error::LoginError(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::LoginError(e.to_string()))?;

    if !status.is_success() {
        /* Raw body, so the caller can surface whatever the server said */
        return Err(Error::LoginError(text));
    }

    serde_json::from_str::<response::login::Login>(&text)
        .map_err(|e| Error::InvalidResponse(text, e.to_string()))
        .map(|login| model::LoggedInApi {
            api_url: api.api_url.to_owned(),
            token: login.token,
            client,
        })
}

async fn get(api: &model::LoggedInApi, endpoint: &endpoint::Endpoint) -> Result<Value, Error> {
    let url = format!("{}{}", api.api_url, endpoint);

    api.client
        .get(url)
        .header(AUTHORIZATION, auth_header(&api.token))
        .send()
        .await
        .map_err(map_request_err)
        .map(read_json)?
        .await
}

async fn post<T: serde::Serialize>(
    api: &model::LoggedInApi,
    endpoint: &endpoint::Endpoint,
    body: &T,
    with_token: bool,
) -> Result<Value, Error> {
    let url = format!("{}{}", api.api_url, endpoint);

    let request = api.client.post(url).json(body);
    let request = if with_token {
        request.header(AUTHORIZATION, auth_header(&api.token))
    } else {
        request
    };

    request
        .send()
        .await
        .map_err(map_request_err)
        .map(read_json)?
        .await
}

/// List all registered devices.
pub async fn devices(api: &model::LoggedInApi) -> Result<Vec<model::Device>, Error> {
    get(api, endpoint::DEVICES)
        .await
        .map(serde_json::from_value::<Vec<DeviceRecord>>)?
        .or(Err(Error::UnexpectedApiResponse))
        .map(|records| {
            records
                .into_iter()
                .map(|record| model::Device {
                    id: record.id,
                    device_id: record.device_id,
                })
                .collect()
        })
}

/// Fetch a single device by its numeric id.
pub async fn device(api: &model::LoggedInApi, id: u64) -> Result<model::Device, Error> {
    get(api, &endpoint::device(id))
        .await
        .map(serde_json::from_value::<DeviceRecord>)?
        .or(Err(Error::UnexpectedApiResponse))
        .map(|record| model::Device {
            id: record.id,
            device_id: record.device_id,
        })
}

/// Submit `reading` without credentials, the way a device in the field
/// reports. Returns the server's acknowledgement body.
pub async fn push_reading(
    api: &model::LoggedInApi,
    reading: &model::SensorReading,
) -> Result<Value, Error> {
    post(api, endpoint::DATA_UPDATE, reading, false).await
}

/// Same submission with the session token attached, for deployments where
/// the ingestion endpoint is locked down.
pub async fn push_reading_authenticated(
    api: &model::LoggedInApi,
    reading: &model::SensorReading,
) -> Result<Value, Error> {
    post(api, endpoint::DATA_UPDATE, reading, true).await
}
