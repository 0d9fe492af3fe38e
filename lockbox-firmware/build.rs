//! Build script for lockbox-firmware
//!
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates lockbox.toml at compile time
//! - Generates the board constants the firmware includes

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest queue the firmware reserves storage for
const QUEUE_MAX: i64 = 16;
/// Largest password the lock accepts
const MAX_PASSWORD_LEN: usize = 12;

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
    generate_constants(&config);
    println!("cargo:warning=lockbox.toml validated successfully");
}

/// Linker scripts (memory.x comes from embassy-stm32's memory-x feature)
fn setup_linker() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse lockbox.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=lockbox.toml");

    let config_path = Path::new("lockbox.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: lockbox.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a lockbox.toml configuration file.        ║\n\
            ║  Please create one in the lockbox-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read lockbox.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in lockbox.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|v| v.as_table())
}

/// Check an integer field is present and within `min..=max`
fn check_int(
    errors: &mut Vec<String>,
    table: &toml::value::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v >= min && *v <= max => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => errors.push(format!("[{}] missing '{}'", section, key)),
    }
}

fn validate_config(config: &toml::Value) {
    let mut errors = Vec::new();

    for name in ["morse", "input", "lock", "timing"] {
        if section(config, name).is_none() {
            errors.push(format!("Missing [{}] section", name));
        }
    }
    report("Missing required sections in lockbox.toml", &errors);

    validate_morse(config);
    validate_input(config);
    validate_lock(config);
    validate_timing(config);
}

fn validate_morse(config: &toml::Value) {
    let Some(morse) = section(config, "morse") else {
        return;
    };
    let mut errors = Vec::new();

    for key in ["dot_ms", "dash_ms", "element_gap_ms", "letter_gap_ms", "word_gap_ms"] {
        check_int(&mut errors, morse, "morse", key, 1, 10_000);
    }
    check_int(&mut errors, morse, "morse", "on_duty", 1, u32::MAX as i64);

    if !matches!(morse.get("distinct_gaps"), Some(toml::Value::Boolean(_))) {
        errors.push("[morse] distinct_gaps must be true or false".to_string());
    }

    match morse.get("greeting") {
        Some(toml::Value::String(text)) => {
            if let Some(c) = text
                .chars()
                .find(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
            {
                errors.push(format!("[morse] greeting has unsupported char '{}'", c));
            }
            if text.len() > 16 {
                errors.push("[morse] greeting must be at most 16 characters".to_string());
            }
        }
        Some(_) => errors.push("[morse] greeting must be a string".to_string()),
        None => {}
    }

    report("Invalid [morse] configuration", &errors);
}

fn validate_input(config: &toml::Value) {
    let Some(input) = section(config, "input") else {
        return;
    };
    let mut errors = Vec::new();
    check_int(&mut errors, input, "input", "queue_capacity", 1, QUEUE_MAX);
    report("Invalid [input] configuration", &errors);
}

fn validate_lock(config: &toml::Value) {
    let Some(lock) = section(config, "lock") else {
        return;
    };
    let mut errors = Vec::new();

    match lock.get("default_password") {
        Some(toml::Value::String(pw)) => {
            if pw.is_empty() || pw.len() > MAX_PASSWORD_LEN {
                errors.push(format!(
                    "[lock] default_password must be 1-{} characters",
                    MAX_PASSWORD_LEN
                ));
            }
            if !pw.is_ascii() {
                errors.push("[lock] default_password must be ASCII".to_string());
            }
            // Command keys never reach the entry buffer
            if let Some(c) = pw.chars().find(|c| matches!(c, '*' | '#' | 'B' | 'C' | 'D')) {
                errors.push(format!("[lock] default_password cannot contain key '{}'", c));
            }
        }
        Some(_) => errors.push("[lock] default_password must be a string".to_string()),
        None => errors.push("[lock] missing 'default_password'".to_string()),
    }

    report("Invalid [lock] configuration", &errors);
}

fn validate_timing(config: &toml::Value) {
    let Some(timing) = section(config, "timing") else {
        return;
    };
    let mut errors = Vec::new();
    check_int(&mut errors, timing, "timing", "tick_interval_ms", 1, 100);
    check_int(&mut errors, timing, "timing", "poll_interval_ms", 1, 1000);
    check_int(&mut errors, timing, "timing", "proximity_holdoff_ms", 0, 60_000);
    report("Invalid [timing] configuration", &errors);
}

/// Write `lockbox_config.rs` into OUT_DIR
fn generate_constants(config: &toml::Value) {
    let int = |sec: &str, key: &str| -> i64 {
        config
            .get(sec)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or_default()
    };
    let string = |sec: &str, key: &str| -> String {
        config
            .get(sec)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let distinct_gaps = config
        .get("morse")
        .and_then(|s| s.get("distinct_gaps"))
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let mut out = String::from("// Generated from lockbox.toml by build.rs\n\n");
    out += &format!("pub const DOT_MS: u64 = {};\n", int("morse", "dot_ms"));
    out += &format!("pub const DASH_MS: u64 = {};\n", int("morse", "dash_ms"));
    out += &format!("pub const ELEMENT_GAP_MS: u64 = {};\n", int("morse", "element_gap_ms"));
    out += &format!("pub const LETTER_GAP_MS: u64 = {};\n", int("morse", "letter_gap_ms"));
    out += &format!("pub const WORD_GAP_MS: u64 = {};\n", int("morse", "word_gap_ms"));
    out += &format!("pub const DISTINCT_GAPS: bool = {};\n", distinct_gaps);
    out += &format!("pub const ON_DUTY: u32 = {};\n", int("morse", "on_duty"));
    out += &format!("pub const GREETING: &str = {:?};\n", string("morse", "greeting"));
    out += &format!("pub const QUEUE_CAPACITY: usize = {};\n", int("input", "queue_capacity"));
    out += &format!("pub const QUEUE_MAX: usize = {};\n", QUEUE_MAX);
    out += &format!(
        "pub const DEFAULT_PASSWORD: &[u8] = b{:?};\n",
        string("lock", "default_password")
    );
    out += &format!("pub const TICK_INTERVAL_MS: u64 = {};\n", int("timing", "tick_interval_ms"));
    out += &format!("pub const POLL_INTERVAL_MS: u64 = {};\n", int("timing", "poll_interval_ms"));
    out += &format!(
        "pub const PROXIMITY_HOLDOFF_MS: u64 = {};\n",
        int("timing", "proximity_holdoff_ms")
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("lockbox_config.rs"), out).unwrap();
}
