//! Built-in capability actions.
//!
//! The closed set of actions backing the built-in catalog: launching
//! desktop applications, host inspection probes, clock/calendar queries,
//! and file deletion. Probes read from `/proc` where available and report
//! a `Failure` elsewhere rather than guessing.

use std::collections::BTreeMap;
use std::fs;
use std::process::Command;

use chrono::Local;
use serde_json::json;

use super::{CapabilityAction, ExecutionOutcome};

/// Which host report a [`BuiltinAction::SystemReport`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Platform, CPU count, total memory.
    System,
    /// Load averages and logical CPU count.
    Cpu,
    /// Total/available/used memory.
    Memory,
    /// Root filesystem usage.
    Disk,
    /// Per-interface byte counters.
    Network,
}

/// The fixed set of built-in actions.
#[derive(Debug, Clone)]
pub enum BuiltinAction {
    /// Spawn a desktop application and detach.
    OpenApplication {
        /// Program to spawn.
        program: String,
        /// Arguments passed to the program.
        args: Vec<String>,
    },
    /// Produce a host report.
    SystemReport(ReportKind),
    /// Current wall-clock time.
    CurrentTime,
    /// Current calendar date.
    CurrentDate,
    /// Delete the file named by the `file_path` parameter.
    DeleteFile,
}

impl CapabilityAction for BuiltinAction {
    fn execute(&self, params: &BTreeMap<String, String>) -> ExecutionOutcome {
        match self {
            BuiltinAction::OpenApplication { program, args } => open_application(program, args),
            BuiltinAction::SystemReport(kind) => system_report(*kind),
            BuiltinAction::CurrentTime => current_time(),
            BuiltinAction::CurrentDate => current_date(),
            BuiltinAction::DeleteFile => delete_file(params),
        }
    }
}

fn open_application(program: &str, args: &[String]) -> ExecutionOutcome {
    match Command::new(program).args(args).spawn() {
        Ok(child) => {
            log::info!("launched '{}' (pid {})", program, child.id());
            ExecutionOutcome::success(json!({ "launched": program, "pid": child.id() }))
        }
        Err(e) => ExecutionOutcome::failure(format!("failed to launch '{}': {}", program, e)),
    }
}

fn current_time() -> ExecutionOutcome {
    let now = Local::now();
    ExecutionOutcome::success(json!({
        "time": now.format("%H:%M:%S").to_string(),
        "timezone": now.offset().to_string(),
    }))
}

fn current_date() -> ExecutionOutcome {
    let now = Local::now();
    ExecutionOutcome::success(json!({
        "date": now.format("%Y-%m-%d").to_string(),
        "day_of_week": now.format("%A").to_string(),
    }))
}

fn delete_file(params: &BTreeMap<String, String>) -> ExecutionOutcome {
    let Some(path) = params.get("file_path") else {
        return ExecutionOutcome::failure("missing required parameter 'file_path'");
    };
    match fs::remove_file(path) {
        Ok(()) => ExecutionOutcome::success(json!({ "deleted": path })),
        Err(e) => ExecutionOutcome::failure(format!("failed to delete '{}': {}", path, e)),
    }
}

fn system_report(kind: ReportKind) -> ExecutionOutcome {
    let report = match kind {
        ReportKind::System => system_info(),
        ReportKind::Cpu => cpu_info(),
        ReportKind::Memory => memory_info(),
        ReportKind::Disk => disk_info(),
        ReportKind::Network => network_info(),
    };
    match report {
        Ok(value) => ExecutionOutcome::Success { value },
        Err(message) => ExecutionOutcome::Failure { message },
    }
}

fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn system_info() -> Result<serde_json::Value, String> {
    let memory_total = meminfo_field("MemTotal").ok();
    Ok(json!({
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "family": std::env::consts::FAMILY,
        "cpu_count": cpu_count(),
        "memory_total": memory_total.map(format_gib),
    }))
}

fn cpu_info() -> Result<serde_json::Value, String> {
    let loadavg = fs::read_to_string("/proc/loadavg")
        .map_err(|e| format!("cpu usage unavailable: {}", e))?;
    let mut fields = loadavg.split_whitespace();
    let one = fields.next().unwrap_or("0");
    let five = fields.next().unwrap_or("0");
    let fifteen = fields.next().unwrap_or("0");
    Ok(json!({
        "load_1m": one,
        "load_5m": five,
        "load_15m": fifteen,
        "cpu_count": cpu_count(),
    }))
}

fn memory_info() -> Result<serde_json::Value, String> {
    let total = meminfo_field("MemTotal")?;
    let available = meminfo_field("MemAvailable")?;
    let used = total.saturating_sub(available);
    let percent = if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    Ok(json!({
        "total": format_gib(total),
        "available": format_gib(available),
        "used": format_gib(used),
        "percent": format!("{:.2}%", percent),
    }))
}

/// Read a field from /proc/meminfo, in bytes.
fn meminfo_field(field: &str) -> Result<u64, String> {
    let meminfo = fs::read_to_string("/proc/meminfo")
        .map_err(|e| format!("memory usage unavailable: {}", e))?;
    for line in meminfo.lines() {
        if let Some(rest) = line.strip_prefix(field) {
            let kib: u64 = rest
                .trim_start_matches(':')
                .trim()
                .trim_end_matches(" kB")
                .parse()
                .map_err(|e| format!("malformed /proc/meminfo: {}", e))?;
            return Ok(kib * 1024);
        }
    }
    Err(format!("field '{}' not present in /proc/meminfo", field))
}

fn disk_info() -> Result<serde_json::Value, String> {
    let output = Command::new("df")
        .args(["-P", "-k", "/"])
        .output()
        .map_err(|e| format!("disk usage unavailable: {}", e))?;
    if !output.status.success() {
        return Err("disk usage unavailable: df failed".to_string());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .nth(1)
        .ok_or_else(|| "disk usage unavailable: empty df output".to_string())?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return Err("disk usage unavailable: malformed df output".to_string());
    }
    let kib = |s: &str| s.parse::<u64>().unwrap_or(0) * 1024;
    Ok(json!({
        "total": format_gib(kib(fields[1])),
        "used": format_gib(kib(fields[2])),
        "free": format_gib(kib(fields[3])),
        "percent": fields[4],
    }))
}

fn network_info() -> Result<serde_json::Value, String> {
    let dev = fs::read_to_string("/proc/net/dev")
        .map_err(|e| format!("network info unavailable: {}", e))?;
    let mut interfaces = serde_json::Map::new();
    // First two lines are headers.
    for line in dev.lines().skip(2) {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 9 {
            continue;
        }
        interfaces.insert(
            name.trim().to_string(),
            json!({
                "bytes_received": fields[0].parse::<u64>().unwrap_or(0),
                "bytes_sent": fields[8].parse::<u64>().unwrap_or(0),
            }),
        );
    }
    Ok(serde_json::Value::Object(interfaces))
}

fn format_gib(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}
