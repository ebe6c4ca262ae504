//! The built-in capability set.
//!
//! System monitoring, application control, time/date, and file-operation
//! capabilities, each registered with its descriptor (rich example
//! phrasings drive exact/partial matching during resolution) and a
//! [`BuiltinAction`].

use std::sync::Arc;

use crate::executor::actions::{BuiltinAction, ReportKind};

use super::descriptor::{CapabilityDescriptor, Category};
use super::registry::InMemoryCatalog;

#[cfg(windows)]
const CALCULATOR: &str = "calc";
#[cfg(not(windows))]
const CALCULATOR: &str = "gnome-calculator";

#[cfg(windows)]
const NOTEPAD: &str = "notepad";
#[cfg(not(windows))]
const NOTEPAD: &str = "gedit";

#[cfg(windows)]
const BROWSER: &str = "cmd";
#[cfg(not(windows))]
const BROWSER: &str = "xdg-open";

#[cfg(windows)]
fn browser_args() -> Vec<String> {
    vec![
        "/C".to_string(),
        "start".to_string(),
        "https://www.google.com".to_string(),
    ]
}

#[cfg(not(windows))]
fn browser_args() -> Vec<String> {
    vec!["https://www.google.com".to_string()]
}

impl InMemoryCatalog {
    /// Build a catalog pre-populated with the built-in capability set.
    pub fn builtin() -> Self {
        let catalog = Self::new();
        catalog.register_builtins();
        catalog
    }

    fn register_builtins(&self) {
        let register = |descriptor: CapabilityDescriptor, action: BuiltinAction| {
            // Built-in names are unique by construction.
            self.register_with_action(descriptor, Arc::new(action))
                .expect("built-in capability names collide");
        };

        // System monitoring
        register(
            CapabilityDescriptor::new(
                "get_system_info",
                "Get comprehensive system information including CPU, RAM, disk, and network details",
                Category::SystemMonitoring,
            )
            .with_examples([
                "Show system information",
                "Get system details",
                "Display system status",
                "Show system stats",
                "Get system overview",
                "Show system info",
                "Get system information",
                "Display system information",
                "Show system details",
                "Get system status",
                "Show system",
                "Get system",
                "Display system",
                "Show system overview",
            ]),
            BuiltinAction::SystemReport(ReportKind::System),
        );

        register(
            CapabilityDescriptor::new(
                "get_cpu_usage",
                "Get current CPU usage and details",
                Category::SystemMonitoring,
            )
            .with_examples([
                "Show CPU usage",
                "Get CPU stats",
                "Display CPU information",
                "Show CPU details",
                "Get CPU performance",
                "Show CPU utilization",
                "Get CPU load",
                "Display CPU usage",
                "Get CPU information",
            ]),
            BuiltinAction::SystemReport(ReportKind::Cpu),
        );

        register(
            CapabilityDescriptor::new(
                "get_ram_usage",
                "Get current RAM usage and details",
                Category::SystemMonitoring,
            )
            .with_examples([
                "Show RAM usage",
                "Get RAM stats",
                "Display RAM information",
                "Show RAM details",
                "Get memory usage",
                "Show memory usage",
                "Get RAM utilization",
                "Display memory information",
                "Show memory stats",
            ]),
            BuiltinAction::SystemReport(ReportKind::Memory),
        );

        register(
            CapabilityDescriptor::new(
                "get_disk_usage",
                "Get current disk usage and details",
                Category::SystemMonitoring,
            )
            .with_examples([
                "Show disk usage",
                "Get disk stats",
                "Display disk information",
                "Show disk details",
                "Get storage usage",
                "Show storage usage",
                "Get disk utilization",
                "Display storage information",
                "Show storage stats",
            ]),
            BuiltinAction::SystemReport(ReportKind::Disk),
        );

        register(
            CapabilityDescriptor::new(
                "get_network_info",
                "Get current network interface information",
                Category::SystemMonitoring,
            )
            .with_examples([
                "Show network info",
                "Get network stats",
                "Display network information",
                "Show network details",
                "Get network status",
                "Show network status",
                "Display network details",
                "Get network interface info",
            ]),
            BuiltinAction::SystemReport(ReportKind::Network),
        );

        // Application control
        register(
            CapabilityDescriptor::new(
                "open_calculator",
                "Open the system calculator application",
                Category::ApplicationControl,
            )
            .with_examples([
                "Open calculator",
                "Launch calculator",
                "Start calculator",
                "Run calculator",
                "Open calc",
            ]),
            BuiltinAction::OpenApplication {
                program: CALCULATOR.to_string(),
                args: vec![],
            },
        );

        register(
            CapabilityDescriptor::new(
                "open_notepad",
                "Open the system notepad application",
                Category::ApplicationControl,
            )
            .with_examples([
                "Open notepad",
                "Launch notepad",
                "Start notepad",
                "Run notepad",
                "Open text editor",
            ]),
            BuiltinAction::OpenApplication {
                program: NOTEPAD.to_string(),
                args: vec![],
            },
        );

        register(
            CapabilityDescriptor::new(
                "open_chrome",
                "Open the Google Chrome web browser",
                Category::ApplicationControl,
            )
            .with_examples([
                "Open Chrome",
                "Launch Chrome",
                "Start Chrome",
                "Run Chrome",
                "Open web browser",
            ]),
            BuiltinAction::OpenApplication {
                program: BROWSER.to_string(),
                args: browser_args(),
            },
        );

        // Time and date
        register(
            CapabilityDescriptor::new(
                "get_current_time",
                "Get the current time with timezone information",
                Category::TimeAndDate,
            )
            .with_examples([
                "Show current time",
                "Get time",
                "Display time",
                "What time is it",
                "Current time",
            ]),
            BuiltinAction::CurrentTime,
        );

        register(
            CapabilityDescriptor::new(
                "get_current_date",
                "Get the current date with day of week",
                Category::TimeAndDate,
            )
            .with_examples([
                "Show current date",
                "Get date",
                "Display date",
                "What date is it",
                "Current date",
            ]),
            BuiltinAction::CurrentDate,
        );

        // File operations
        register(
            CapabilityDescriptor::new(
                "delete_file",
                "Delete a file from the system",
                Category::FileSystem,
            )
            .with_parameter("file_path", "Path to the file to delete")
            .with_examples([
                "Delete file",
                "Remove file",
                "Erase file",
                "Delete the file",
                "Remove the file",
            ]),
            BuiltinAction::DeleteFile,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::registry::CapabilityCatalog;

    #[test]
    fn test_builtin_catalog_population() {
        let catalog = InMemoryCatalog::builtin();
        assert_eq!(catalog.len(), 11);

        for name in [
            "get_system_info",
            "get_cpu_usage",
            "get_ram_usage",
            "get_disk_usage",
            "get_network_info",
            "open_calculator",
            "open_notepad",
            "open_chrome",
            "get_current_time",
            "get_current_date",
            "delete_file",
        ] {
            let descriptor = catalog.descriptor(name).unwrap();
            assert!(!descriptor.examples.is_empty(), "{} has no examples", name);
            assert!(catalog.action(name).is_some(), "{} has no action", name);
        }
    }

    #[test]
    fn test_builtin_categories() {
        let catalog = InMemoryCatalog::builtin();
        assert_eq!(
            catalog.descriptor("get_cpu_usage").unwrap().category,
            Category::SystemMonitoring
        );
        assert_eq!(
            catalog.descriptor("open_calculator").unwrap().category,
            Category::ApplicationControl
        );
        assert_eq!(
            catalog.descriptor("delete_file").unwrap().category,
            Category::FileSystem
        );
    }
}
