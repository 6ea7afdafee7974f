//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::VALID_SOURCES;
use super::file::ConfigFileError;
use super::settings::{AlertMode, ConfigFile};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        if let Some(v) = non_empty(section.get("latitude")) {
            let lat: f64 = parse_value("location", "latitude", v, "must be a number")?;
            if !(-90.0..=90.0).contains(&lat) {
                return Err(invalid("location", "latitude", v, "must be between -90 and 90"));
            }
            config.location.latitude = Some(lat);
        }
        if let Some(v) = non_empty(section.get("longitude")) {
            let lon: f64 = parse_value("location", "longitude", v, "must be a number")?;
            if !(-180.0..=180.0).contains(&lon) {
                return Err(invalid("location", "longitude", v, "must be between -180 and 180"));
            }
            config.location.longitude = Some(lon);
        }
        if let Some(v) = non_empty(section.get("radius_km")) {
            let radius: f64 = parse_value("location", "radius_km", v, "must be a number")?;
            if !(radius.is_finite() && radius > 0.0) {
                return Err(invalid("location", "radius_km", v, "must be greater than 0"));
            }
            config.location.radius_km = radius;
        }
    }

    // [tracking] section
    if let Some(section) = ini.section(Some("tracking")) {
        if let Some(v) = non_empty(section.get("update_interval")) {
            let interval: f64 =
                parse_value("tracking", "update_interval", v, "must be a number (seconds)")?;
            if !(interval.is_finite() && interval >= 1.0) {
                return Err(invalid("tracking", "update_interval", v, "must be at least 1 second"));
            }
            config.tracking.update_interval = interval;
        }
        if let Some(v) = non_empty(section.get("source")) {
            let v = v.to_lowercase();
            if !VALID_SOURCES.contains(&v.as_str()) {
                return Err(invalid(
                    "tracking",
                    "source",
                    &v,
                    &format!("must be one of: {}", VALID_SOURCES.join(", ")),
                ));
            }
            config.tracking.source = v;
        }
        if let Some(v) = section.get("highlight") {
            config.tracking.highlight = parse_list(v);
        }
        if let Some(v) = section.get("non_interactive") {
            config.tracking.non_interactive = parse_bool(v);
        }
    }

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        config.source.opensky_username = non_empty(section.get("opensky_username")).map(String::from);
        config.source.opensky_password = non_empty(section.get("opensky_password")).map(String::from);
        config.source.adsbexchange_api_key =
            non_empty(section.get("adsbexchange_api_key")).map(String::from);
        config.source.airlabs_api_key = non_empty(section.get("airlabs_api_key")).map(String::from);
        config.source.aviationstack_api_key =
            non_empty(section.get("aviationstack_api_key")).map(String::from);
        config.source.flightradar24_api_key =
            non_empty(section.get("flightradar24_api_key")).map(String::from);
        config.source.flightaware_username =
            non_empty(section.get("flightaware_username")).map(String::from);
        config.source.flightaware_api_key =
            non_empty(section.get("flightaware_api_key")).map(String::from);

        if let Some(v) = non_empty(section.get("timeout")) {
            let timeout: u64 =
                parse_value("source", "timeout", v, "must be a positive integer (seconds)")?;
            if timeout == 0 {
                return Err(invalid("source", "timeout", v, "must be a positive integer (seconds)"));
            }
            config.source.timeout = timeout;
        }
    }

    // [simulator] section
    if let Some(section) = ini.section(Some("simulator")) {
        if let Some(v) = non_empty(section.get("target_count")) {
            let count: usize =
                parse_value("simulator", "target_count", v, "must be a positive integer")?;
            if count == 0 {
                return Err(invalid("simulator", "target_count", v, "must be at least 1"));
            }
            config.simulator.target_count = count;
        }
        if let Some(v) = non_empty(section.get("seed")) {
            config.simulator.seed =
                Some(parse_value("simulator", "seed", v, "must be an unsigned integer")?);
        }
    }

    // [alert] section
    if let Some(section) = ini.section(Some("alert")) {
        if let Some(v) = non_empty(section.get("mode")) {
            config.alert.mode = AlertMode::from_config_str(v)
                .ok_or_else(|| invalid("alert", "mode", v, "must be one of: bell, command, off"))?;
        }
        if let Some(v) = non_empty(section.get("command")) {
            config.alert.command = v.to_string();
        }
        if let Some(v) = non_empty(section.get("sound_file")) {
            config.alert.sound_file = Some(expand_tilde(v));
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value.parse().map_err(|_| invalid(section, key, value, reason))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Comma separated list, blanks dropped.
pub(super) fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    fn invalid_key(result: Result<ConfigFile, ConfigFileError>) -> (String, String) {
        match result {
            Err(ConfigFileError::InvalidValue { section, key, .. }) => (section, key),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_ini_gives_defaults() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[location]
latitude = 47.3769
longitude = 8.5417
radius_km = 12.5

[tracking]
update_interval = 2.5
source = AirLabs
highlight = SWR12, lx318 ,,
non_interactive = yes

[source]
opensky_username = pilot
opensky_password = secret
airlabs_api_key = abc
aviationstack_api_key =
flightaware_username = fa-user
flightaware_api_key = fa-key
timeout = 30

[simulator]
target_count = 8
seed = 42

[alert]
mode = command
command = paplay
sound_file = /tmp/ping.wav

[logging]
file = /tmp/skyradar.log
"#,
        )
        .unwrap();

        assert_eq!(config.location.latitude, Some(47.3769));
        assert_eq!(config.location.longitude, Some(8.5417));
        assert_eq!(config.location.radius_km, 12.5);
        assert_eq!(config.tracking.update_interval, 2.5);
        assert_eq!(config.tracking.source, "airlabs");
        assert_eq!(config.tracking.highlight, vec!["SWR12", "lx318"]);
        assert!(config.tracking.non_interactive);
        assert_eq!(config.source.opensky_username.as_deref(), Some("pilot"));
        assert_eq!(config.source.airlabs_api_key.as_deref(), Some("abc"));
        assert_eq!(config.source.aviationstack_api_key, None);
        assert_eq!(config.source.flightradar24_api_key, None);
        assert_eq!(config.source.flightaware_username.as_deref(), Some("fa-user"));
        assert_eq!(config.source.flightaware_api_key.as_deref(), Some("fa-key"));
        assert_eq!(config.source.timeout, 30);
        assert_eq!(config.simulator.target_count, 8);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.alert.mode, AlertMode::Command);
        assert_eq!(config.alert.command, "paplay");
        assert_eq!(config.alert.sound_file, Some(PathBuf::from("/tmp/ping.wav")));
        assert_eq!(config.logging.file, PathBuf::from("/tmp/skyradar.log"));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("[location]\nlatitude = 91", ("location", "latitude")),
            ("[location]\nlongitude = east", ("location", "longitude")),
            ("[location]\nradius_km = -1", ("location", "radius_km")),
            ("[tracking]\nupdate_interval = 0.5", ("tracking", "update_interval")),
            ("[tracking]\nsource = flightradar", ("tracking", "source")),
            ("[source]\ntimeout = 0", ("source", "timeout")),
            ("[simulator]\ntarget_count = 0", ("simulator", "target_count")),
            ("[simulator]\nseed = -3", ("simulator", "seed")),
            ("[alert]\nmode = loud", ("alert", "mode")),
        ];

        for (content, (section, key)) in cases {
            assert_eq!(
                invalid_key(parse(content)),
                (section.to_string(), key.to_string()),
                "{}",
                content
            );
        }
    }

    #[test]
    fn test_error_message_names_key() {
        let err = parse("[tracking]\nsource = flightradar").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("tracking.source"));
        assert!(message.contains("flightradar"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool(" ON "));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/beep.wav"), home.join("beep.wav"));
        }
        assert_eq!(expand_tilde("/abs/beep.wav"), PathBuf::from("/abs/beep.wav"));
    }
}
