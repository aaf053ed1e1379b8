//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying resources
//! and request statuses to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::cloudapi::{
    Collection, Datacenter, Lan, Nic, Request, RequestState, RequestStatus, ResourceState, Server,
};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Datacenter row for table display.
#[derive(Tabled)]
struct DatacenterRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// LAN row for table display.
#[derive(Tabled)]
struct LanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Public")]
    public: String,
    #[tabled(rename = "State")]
    state: String,
}

/// Server row for table display.
#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cores")]
    cores: u32,
    #[tabled(rename = "RAM (MB)")]
    ram: u32,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// NIC row for table display.
#[derive(Tabled)]
struct NicRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "LAN")]
    lan: u32,
    #[tabled(rename = "DHCP")]
    dhcp: String,
    #[tabled(rename = "MAC")]
    mac: String,
}

/// Provisioning request row for table display.
#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a datacenter collection for display.
    #[must_use]
    pub fn format_datacenters(&self, datacenters: &Collection<Datacenter>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(datacenters).unwrap_or_default(),
            OutputFormat::Text => Self::format_datacenters_text(datacenters),
        }
    }

    /// Formats a datacenter collection as text.
    fn format_datacenters_text(datacenters: &Collection<Datacenter>) -> String {
        if datacenters.items.is_empty() {
            return String::from("No datacenters found.\n");
        }

        let rows: Vec<DatacenterRow> = datacenters
            .items
            .iter()
            .map(|d| DatacenterRow {
                name: d.properties.name.clone(),
                location: d.properties.location.clone(),
                state: Self::format_resource_state(d.state()),
                id: d.id.clone(),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        let _ = write!(output, "\n\n{} datacenters\n", datacenters.items.len());
        output
    }

    /// Formats a single datacenter for display.
    #[must_use]
    pub fn format_datacenter(&self, datacenter: &Datacenter) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(datacenter).unwrap_or_default(),
            OutputFormat::Text => Self::format_datacenter_text(datacenter),
        }
    }

    /// Formats a datacenter as text.
    fn format_datacenter_text(datacenter: &Datacenter) -> String {
        let mut output = String::new();

        let _ = write!(output, "\nDatacenter: {}\n\n", datacenter.properties.name);
        let _ = writeln!(output, "   ID: {}", datacenter.id);
        let _ = writeln!(output, "   Location: {}", datacenter.properties.location);
        let _ = writeln!(
            output,
            "   State: {}",
            Self::format_resource_state(datacenter.state())
        );

        if let Some(version) = datacenter.properties.version {
            let _ = writeln!(output, "   Version: {version}");
        }

        if let Some(description) = &datacenter.properties.description {
            let _ = writeln!(output, "   Description: {description}");
        }

        if !datacenter.properties.features.is_empty() {
            let _ = writeln!(
                output,
                "   Features: {}",
                datacenter.properties.features.join(", ")
            );
        }

        if let Some(created) = datacenter.metadata.as_ref().and_then(|m| m.created_date) {
            let _ = writeln!(output, "   Created: {}", created.format("%Y-%m-%d %H:%M"));
        }

        output
    }

    /// Formats a LAN collection for display.
    #[must_use]
    pub fn format_lans(&self, lans: &Collection<Lan>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(lans).unwrap_or_default(),
            OutputFormat::Text => Self::format_lans_text(lans),
        }
    }

    /// Formats a LAN collection as text.
    fn format_lans_text(lans: &Collection<Lan>) -> String {
        if lans.items.is_empty() {
            return String::from("No LANs found.\n");
        }

        let rows: Vec<LanRow> = lans
            .items
            .iter()
            .map(|l| LanRow {
                id: l.id.clone(),
                name: l.properties.name.clone().unwrap_or_else(|| String::from("-")),
                public: if l.properties.public {
                    String::from("yes")
                } else {
                    String::from("no")
                },
                state: Self::format_resource_state(l.state()),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        let _ = write!(output, "\n\n{} LANs\n", lans.items.len());
        output
    }

    /// Formats a single LAN for display.
    #[must_use]
    pub fn format_lan(&self, lan: &Lan) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(lan).unwrap_or_default(),
            OutputFormat::Text => Self::format_lan_text(lan),
        }
    }

    /// Formats a LAN as text.
    fn format_lan_text(lan: &Lan) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nLAN {}: {}\n\n",
            lan.id,
            lan.properties.name.as_deref().unwrap_or("unnamed")
        );
        let _ = writeln!(
            output,
            "   Public: {}",
            if lan.properties.public { "yes" } else { "no" }
        );
        let _ = writeln!(output, "   State: {}", Self::format_resource_state(lan.state()));

        if let Some(nics) = lan.entities.as_ref().and_then(|e| e.nics.as_ref()) {
            let _ = writeln!(output, "   Members: {}", nics.items.len());
            for nic in &nics.items {
                let _ = writeln!(
                    output,
                    "     - {} ({})",
                    nic.id,
                    nic.properties.mac.as_deref().unwrap_or("mac pending")
                );
            }
        }

        output
    }

    /// Formats a server collection for display.
    #[must_use]
    pub fn format_servers(&self, servers: &Collection<Server>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(servers).unwrap_or_default(),
            OutputFormat::Text => Self::format_servers_text(servers),
        }
    }

    /// Formats a server collection as text.
    fn format_servers_text(servers: &Collection<Server>) -> String {
        if servers.items.is_empty() {
            return String::from("No servers found.\n");
        }

        let rows: Vec<ServerRow> = servers
            .items
            .iter()
            .map(|s| ServerRow {
                name: s.properties.name.clone(),
                cores: s.properties.cores,
                ram: s.properties.ram,
                state: Self::format_resource_state(s.state()),
                id: s.id.clone(),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        let _ = write!(output, "\n\n{} servers\n", servers.items.len());
        output
    }

    /// Formats a single server for display.
    #[must_use]
    pub fn format_server(&self, server: &Server) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(server).unwrap_or_default(),
            OutputFormat::Text => Self::format_server_text(server),
        }
    }

    /// Formats a server as text.
    fn format_server_text(server: &Server) -> String {
        let mut output = String::new();

        let _ = write!(output, "\nServer: {}\n\n", server.properties.name);
        let _ = writeln!(output, "   ID: {}", server.id);
        let _ = writeln!(output, "   Cores: {}", server.properties.cores);
        let _ = writeln!(output, "   RAM: {} MB", server.properties.ram);
        let _ = writeln!(output, "   State: {}", Self::format_resource_state(server.state()));

        if let Some(zone) = &server.properties.availability_zone {
            let _ = writeln!(output, "   Availability zone: {zone}");
        }

        if let Some(vm_state) = &server.properties.vm_state {
            let _ = writeln!(output, "   VM state: {vm_state}");
        }

        output
    }

    /// Formats a NIC collection for display.
    #[must_use]
    pub fn format_nics(&self, nics: &Collection<Nic>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(nics).unwrap_or_default(),
            OutputFormat::Text => Self::format_nics_text(nics),
        }
    }

    /// Formats a NIC collection as text.
    fn format_nics_text(nics: &Collection<Nic>) -> String {
        if nics.items.is_empty() {
            return String::from("No NICs found.\n");
        }

        let rows: Vec<NicRow> = nics
            .items
            .iter()
            .map(|n| NicRow {
                id: n.id.clone(),
                name: n.properties.name.clone().unwrap_or_else(|| String::from("-")),
                lan: n.properties.lan,
                dhcp: if n.properties.dhcp {
                    String::from("yes")
                } else {
                    String::from("no")
                },
                mac: n.properties.mac.clone().unwrap_or_else(|| String::from("pending")),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        let _ = write!(output, "\n\n{} NICs\n", nics.items.len());
        output
    }

    /// Formats a single NIC for display.
    #[must_use]
    pub fn format_nic(&self, nic: &Nic) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(nic).unwrap_or_default(),
            OutputFormat::Text => Self::format_nic_text(nic),
        }
    }

    /// Formats a NIC as text.
    fn format_nic_text(nic: &Nic) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nNIC {}: {}\n\n",
            nic.id,
            nic.properties.name.as_deref().unwrap_or("unnamed")
        );
        let _ = writeln!(output, "   LAN: {}", nic.properties.lan);
        let _ = writeln!(
            output,
            "   DHCP: {}",
            if nic.properties.dhcp { "yes" } else { "no" }
        );
        let _ = writeln!(
            output,
            "   MAC: {}",
            nic.properties.mac.as_deref().unwrap_or("pending")
        );

        if nic.properties.ips.is_empty() {
            let _ = writeln!(output, "   IPs: (none assigned yet)");
        } else {
            let _ = writeln!(output, "   IPs: {}", nic.properties.ips.join(", "));
        }

        let _ = writeln!(output, "   State: {}", Self::format_resource_state(nic.state()));

        output
    }

    /// Formats a provisioning request collection for display.
    #[must_use]
    pub fn format_requests(&self, requests: &Collection<Request>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(requests).unwrap_or_default(),
            OutputFormat::Text => Self::format_requests_text(requests),
        }
    }

    /// Formats a request collection as text.
    fn format_requests_text(requests: &Collection<Request>) -> String {
        if requests.items.is_empty() {
            return String::from("No requests found.\n");
        }

        let rows: Vec<RequestRow> = requests
            .items
            .iter()
            .map(|r| RequestRow {
                id: r.id.clone(),
                method: r.properties.method.clone().unwrap_or_else(|| String::from("-")),
                url: Self::truncate(r.properties.url.as_deref().unwrap_or("-"), 48),
                created: r
                    .metadata
                    .as_ref()
                    .and_then(|m| m.created_date)
                    .map_or_else(
                        || String::from("-"),
                        |d| d.format("%Y-%m-%d %H:%M").to_string(),
                    ),
            })
            .collect();

        let mut output = Table::new(rows).to_string();
        let _ = write!(output, "\n\n{} requests\n", requests.items.len());
        output
    }

    /// Formats a request status for display.
    #[must_use]
    pub fn format_request_status(&self, status: &RequestStatus) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(status).unwrap_or_default(),
            OutputFormat::Text => Self::format_request_status_text(status),
        }
    }

    /// Formats a request status as text.
    fn format_request_status_text(status: &RequestStatus) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "\nRequest status: {}\n\n",
            Self::format_request_state(status.state())
        );

        if let Some(message) = &status.metadata.message {
            let _ = writeln!(output, "   Message: {message}");
        }

        if !status.metadata.targets.is_empty() {
            let _ = writeln!(output, "   Targets:");
            for target in &status.metadata.targets {
                let _ = writeln!(
                    output,
                    "     - {} {} ({})",
                    target.target.resource_type,
                    target.target.id,
                    Self::format_request_state(target.status)
                );
            }
        }

        output
    }

    /// Formats a resource state with color.
    fn format_resource_state(state: ResourceState) -> String {
        match state {
            ResourceState::Available => "available".green().to_string(),
            ResourceState::Busy => "busy".yellow().to_string(),
            ResourceState::Inactive => "inactive".red().to_string(),
            ResourceState::Unknown => "unknown".dimmed().to_string(),
        }
    }

    /// Formats a request state with color.
    fn format_request_state(state: RequestState) -> String {
        match state {
            RequestState::Done => "done".green().to_string(),
            RequestState::Queued => "queued".yellow().to_string(),
            RequestState::Running => "running".yellow().to_string(),
            RequestState::Failed => "failed".red().to_string(),
            RequestState::Unknown => "unknown".dimmed().to_string(),
        }
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            format!("{}...", &s[..max_len - 3])
        }
    }

    /// Prints a success message to stderr.
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "status": "success", "message": message });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
            OutputFormat::Text => {
                eprintln!("{} {message}", "\u{2713}".green());
            }
        }
    }

    /// Prints an error message to stderr.
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "status": "error", "message": message });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
            OutputFormat::Text => {
                eprintln!("{} {message}", "\u{2717}".red());
            }
        }
    }

    /// Prints a warning message to stderr.
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "status": "warning", "message": message });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
            }
            OutputFormat::Text => {
                eprintln!("{} {message}", "\u{26a0}".yellow());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudapi::{DatacenterProperties, ResourceType};

    fn sample_datacenter() -> Datacenter {
        Datacenter {
            id: String::from("9bcba3b9-3c5e-45c8-9c39-a03e0259d3a9"),
            resource_type: ResourceType::Datacenter,
            href: String::new(),
            metadata: None,
            properties: DatacenterProperties {
                name: String::from("staging"),
                description: None,
                location: String::from("us/las"),
                version: Some(4),
                features: vec![],
            },
            request: None,
        }
    }

    #[test]
    fn test_format_datacenter_text_lists_fields() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter.format_datacenter(&sample_datacenter());

        assert!(output.contains("staging"));
        assert!(output.contains("us/las"));
        assert!(output.contains("Version: 4"));
    }

    #[test]
    fn test_format_datacenter_json_is_wire_shaped() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_datacenter(&sample_datacenter());

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["properties"]["location"], "us/las");
    }

    #[test]
    fn test_format_empty_collection() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let empty = Collection::<Datacenter> {
            id: String::from("datacenters"),
            resource_type: ResourceType::Collection,
            href: String::new(),
            items: vec![],
        };

        assert_eq!(formatter.format_datacenters(&empty), "No datacenters found.\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(
            OutputFormatter::truncate("a-very-long-resource-name", 10),
            "a-very-..."
        );
    }
}
