//! Program catalogue enumeration.

use engdocs_core::{FatalError, Program};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::decode::decode;
use crate::dump::DebugDump;
use crate::source::{FetchSettings, PageSource};

/// Builds the catalogue URL.
pub fn program_list_url(base_url: &str, api_key: &str) -> String {
    format!("{base_url}/groundTestProposalAPI.cfc?method=getProgramList&key={api_key}")
}

/// Fetches the program catalogue.
///
/// Every failure here ends the run; the returned [`FatalError`] carries the
/// exit category.
#[instrument(skip_all)]
pub async fn list_programs<S: PageSource + ?Sized>(
    source: &S,
    base_url: &str,
    api_key: &str,
    settings: &FetchSettings,
    dump: &DebugDump,
) -> Result<Vec<Program>, FatalError> {
    let url = program_list_url(base_url, api_key);
    dump.text("ProgramList_url.txt", &url);

    info!("Fetching program list...");
    let Ok(response) = source.fetch(&url, settings, false).await else {
        log_unreachable(settings);
        return Err(FatalError::ProgramListUnavailable);
    };

    let text = response.text();

    if text.to_lowercase().contains("<html") {
        banner("Received HTML response instead of JSON");
        error!("This indicates an authentication or access issue.");
        error!("Please connect to the corporate network using the VPN client.");
        let forced = DebugDump::new(dump.root(), true);
        forced.text("authentication.html", &text);
        error!(
            "Debug information saved to: {}",
            dump.root().join("authentication.html").display()
        );
        return Err(FatalError::HtmlResponse);
    }

    if text.contains("ERROR") {
        banner("API returned an error message");
        error!("This typically indicates an API key issue.");
        error!("Common causes:");
        error!("- Using production API key in QAS environment");
        error!("- Using QAS API key in production environment");
        error!("- Expired or invalid API key");
        error!("API Error Message:");
        error!("{}", text);
        return Err(FatalError::ApiRejected(text));
    }

    dump.text("ProgramList.txt", &text);

    let payload = decode(Some(&response)).unwrap_or(Value::Null);
    dump.json("ProgramList.json", &payload);

    let records = match payload {
        Value::Object(mut map) if map.contains_key("programs") => {
            map.remove("programs").unwrap_or(Value::Null)
        }
        Value::Array(_) => payload,
        other => {
            error!("Unexpected JSON structure in program list response");
            if let Value::Object(map) = &other {
                error!("Keys: {:?}", map.keys().collect::<Vec<_>>());
            }
            return Err(FatalError::UnexpectedProgramList(describe(&other).to_string()));
        }
    };

    let programs: Vec<Program> = serde_json::from_value(records).map_err(|e| {
        error!(error = %e, "Program list entries could not be read");
        FatalError::UnexpectedProgramList(e.to_string())
    })?;

    info!("Found {} programs", programs.len());
    Ok(programs)
}

fn banner(message: &str) {
    error!("{}", "*".repeat(55));
    error!("*** ERROR: {} ***", message);
    error!("{}", "*".repeat(55));
}

fn log_unreachable(settings: &FetchSettings) {
    banner("Unable to retrieve program list data");
    error!("Possible causes:");
    error!("1. VPN connection is not active or stable");
    error!("2. Server is experiencing high load or maintenance");
    error!("3. Network connectivity issues");
    error!("4. Insufficient timeout (current: {}s)", settings.timeout.as_secs());
    error!("Troubleshooting steps:");
    error!("1. Verify VPN connection to the corporate network");
    error!("2. Increase API_TIMEOUT in .env file (e.g., API_TIMEOUT=300)");
    error!("3. Increase MAX_RETRIES in .env file (e.g., MAX_RETRIES=10)");
    error!("4. Try again during off-peak hours");
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without a programs key",
    }
}
