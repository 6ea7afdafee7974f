//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let latitude = config.location.latitude.map(|v| v.to_string()).unwrap_or_default();
    let longitude = config.location.longitude.map(|v| v.to_string()).unwrap_or_default();
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let seed = config.simulator.seed.map(|v| v.to_string()).unwrap_or_default();
    let sound_file = config
        .alert
        .sound_file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[location]
; Center of the tracked region in decimal degrees.
; Leave empty to require --latitude/--longitude on the command line.
latitude = {}
longitude = {}
; Region radius in kilometres
radius_km = {}

[tracking]
; Seconds between polls (minimum 1)
update_interval = {}
; Data source:
;   opensky       - OpenSky Network (free, optional account)
;   adsbexchange  - ADS-B Exchange via RapidAPI (requires API key)
;   airlabs       - AirLabs (requires API key)
;   aviationstack - AviationStack (requires access key)
;   flightradar24 - FlightRadar24 live feed (requires API key)
;   flightaware   - FlightAware FlightXML3 (requires username and API key)
;   mock          - simulated traffic, no network
source = {}
; Comma separated callsigns to highlight on the radar
highlight = {}
; Print arrival reports instead of drawing the radar
non_interactive = {}

[source]
opensky_username = {}
opensky_password = {}
adsbexchange_api_key = {}
airlabs_api_key = {}
aviationstack_api_key = {}
flightradar24_api_key = {}
flightaware_username = {}
flightaware_api_key = {}
; HTTP request timeout in seconds
timeout = {}

[simulator]
; Number of simulated aircraft kept alive
target_count = {}
; Fixed seed for reproducible traffic (empty for random)
seed = {}

[alert]
; bell    - terminal bell
; command - play sound_file with the player command
; off     - no alert
mode = {}
command = {}
; WAV file to play (empty for the built-in beep)
sound_file = {}

[logging]
file = {}
"#,
        latitude,
        longitude,
        config.location.radius_km,
        config.tracking.update_interval,
        config.tracking.source,
        config.tracking.highlight.join(", "),
        config.tracking.non_interactive,
        opt(&config.source.opensky_username),
        opt(&config.source.opensky_password),
        opt(&config.source.adsbexchange_api_key),
        opt(&config.source.airlabs_api_key),
        opt(&config.source.aviationstack_api_key),
        opt(&config.source.flightradar24_api_key),
        opt(&config.source.flightaware_username),
        opt(&config.source.flightaware_api_key),
        config.source.timeout,
        config.simulator.target_count,
        seed,
        config.alert.mode.as_str(),
        config.alert.command,
        sound_file,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
