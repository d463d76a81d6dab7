use super::models::Host;

pub const PREDEFINED_HOSTS: &[&str] = &[
    "google.com",
    "yahoo.com",
    "bing.com",
    "nonexistent.domain.test",
    "10.255.255.1",
];

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_host_list(input: &str) -> Vec<Host> {
    input.split(',').filter_map(Host::parse).collect()
}

pub fn predefined_hosts<S: AsRef<str>>(names: &[S]) -> Vec<Host> {
    names.iter().filter_map(|n| Host::parse(n.as_ref())).collect()
}
