//! Static catalogs: wordlist sources, sysinfo commands, probe defaults.

use anyhow::Result;
use serde_json::{json, Value};
use std::path::Path;

use crate::source::{SourceSpec, Task};

/// Default target of `opskit headers`.
pub const DEFAULT_HEADERS_URL: &str = "http://www.elg.no";

/// Default target of `opskit post`.
pub const DEFAULT_POST_URL: &str = "https://httpbin.org/post";

/// Headers sent by the POST demo.
pub fn default_post_headers() -> Vec<(String, String)> {
    [
        ("User-Agent", "Secret Agent Man/1.0"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Custom-Header-Name", "Bond, James Bond"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// JSON body sent by the POST demo.
pub fn default_post_payload() -> Value {
    json!({
        "name": "James Bond",
        "age": 42,
        "location": "MI5 Headquarters",
    })
}

/// Branches tried, in order, for a GitHub-hosted wordlist.
pub const GITHUB_BRANCHES: &[&str] = &["main", "master"];

/// A wordlist hosted in a GitHub repository.
#[derive(Debug, Clone, Copy)]
pub struct GithubWordlist {
    pub repo: &'static str,
    pub path: &'static str,
    pub output: &'static str,
    pub description: &'static str,
}

pub const GITHUB_WORDLISTS: &[GithubWordlist] = &[
    GithubWordlist {
        repo: "n0kovo/n0kovo_subdomains",
        path: "n0kovo_subdomains_huge.txt",
        output: "n0kovo_subdomains_huge.txt",
        description: "n0kovo's huge subdomain list",
    },
    GithubWordlist {
        repo: "danielmiessler/SecLists",
        path: "Discovery/Web-Content/combined_directories.txt",
        output: "combined_directories.txt",
        description: "Combined Directories list",
    },
];

/// RockYou mirrors as `(repo, branch, path)`, tried in order; all save to `rockyou.txt`.
pub const ROCKYOU_MIRRORS: &[(&str, &str, &str)] = &[
    ("brannondorsey/naive-hashcat", "master", "wordlists/rockyou.txt"),
    ("danielmiessler/SecLists", "master", "Passwords/Leaked-Databases/rockyou.txt"),
    ("danielmiessler/SecLists", "master", "Passwords/Leaked-Databases/rockyou-75.txt"),
];

pub const ROCKYOU_OUTPUT: &str = "rockyou.txt";
pub const ROCKYOU_DESCRIPTION: &str = "RockYou password list";

/// Wordlist tasks in run order, writing into `dir`.
pub fn wordlist_tasks(dir: &Path) -> Result<Vec<Task>> {
    let mut tasks = Vec::with_capacity(GITHUB_WORDLISTS.len() + 1);
    for w in GITHUB_WORDLISTS {
        let sources = GITHUB_BRANCHES
            .iter()
            .map(|branch| SourceSpec::github_raw(w.repo, branch, w.path))
            .collect();
        tasks.push(Task::new(w.description, sources, dir.join(w.output))?);
    }
    let rockyou = ROCKYOU_MIRRORS
        .iter()
        .map(|(repo, branch, path)| SourceSpec::github_raw(repo, branch, path))
        .collect();
    tasks.push(Task::new(
        ROCKYOU_DESCRIPTION,
        rockyou,
        dir.join(ROCKYOU_OUTPUT),
    )?);
    Ok(tasks)
}

/// One sysinfo catalog entry: a shell command appended to a category file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectorCommand {
    pub command: &'static str,
    pub file: &'static str,
    pub description: &'static str,
}

const fn c(command: &'static str, file: &'static str, description: &'static str) -> CollectorCommand {
    CollectorCommand {
        command,
        file,
        description,
    }
}

/// Commands run by `opskit sysinfo`, in order. Sensitive reads (shadow,
/// sudoers, shell history) are intentional for authorized assessments.
pub const SYSINFO_COMMANDS: &[CollectorCommand] = &[
    c("uname -a", "01_system_info.txt", "Kernel and system information"),
    c("cat /etc/os-release", "01_system_info.txt", "OS release information"),
    c("hostnamectl", "01_system_info.txt", "Host information"),
    c("uptime", "01_system_info.txt", "System uptime"),
    c("lscpu", "02_hardware.txt", "CPU information"),
    c("free -h", "02_hardware.txt", "Memory information"),
    c("df -h", "02_hardware.txt", "Disk usage"),
    c("lsblk", "02_hardware.txt", "Block devices"),
    c("lspci", "02_hardware.txt", "PCI devices"),
    c("lsusb", "02_hardware.txt", "USB devices"),
    c("ip addr show", "03_network.txt", "Network interfaces"),
    c("ip route show", "03_network.txt", "Routing table"),
    c("netstat -tuln", "03_network.txt", "Listening ports"),
    c("ss -tuln", "03_network.txt", "Socket statistics"),
    c("arp -a", "03_network.txt", "ARP table"),
    c("cat /etc/passwd", "04_users.txt", "User accounts"),
    c("cat /etc/group", "04_users.txt", "Groups"),
    c("w", "04_users.txt", "Currently logged in users"),
    c("last -10", "04_users.txt", "Recent logins"),
    c("id", "04_users.txt", "Current user ID"),
    c("ps aux", "05_processes.txt", "Running processes"),
    c(
        "systemctl list-units --type=service --state=running",
        "05_processes.txt",
        "Running services",
    ),
    c(
        "systemctl list-units --type=service --state=enabled",
        "05_processes.txt",
        "Enabled services",
    ),
    c("crontab -l", "05_processes.txt", "User cron jobs"),
    c("cat /etc/crontab", "05_processes.txt", "System cron jobs"),
    c("cat /etc/sudoers", "06_security.txt", "Sudoers configuration"),
    c(
        "find /etc/sudoers.d/ -type f -exec cat {} \\;",
        "06_security.txt",
        "Sudoers.d files",
    ),
    c("cat /etc/shadow", "06_security.txt", "Password hashes (if accessible)"),
    c("find / -perm -4000 -type f 2>/dev/null", "06_security.txt", "SUID files"),
    c("find / -perm -2000 -type f 2>/dev/null", "06_security.txt", "SGID files"),
    c("getcap -r / 2>/dev/null", "06_security.txt", "Files with capabilities"),
    c("dpkg -l", "07_software.txt", "Installed packages (Debian/Ubuntu)"),
    c("rpm -qa", "07_software.txt", "Installed packages (RedHat/CentOS)"),
    c(
        "which gcc g++ python python3 perl ruby php java javac",
        "07_software.txt",
        "Development tools",
    ),
    c("env", "08_environment.txt", "Environment variables"),
    c("cat /etc/hosts", "08_environment.txt", "Hosts file"),
    c("cat /etc/resolv.conf", "08_environment.txt", "DNS configuration"),
    c("mount", "08_environment.txt", "Mounted filesystems"),
    c("tail -50 /var/log/auth.log", "09_logs.txt", "Authentication logs"),
    c("tail -50 /var/log/syslog", "09_logs.txt", "System logs"),
    c("tail -50 /var/log/messages", "09_logs.txt", "System messages"),
    c("journalctl --no-pager -n 50", "09_logs.txt", "Recent journal entries"),
    c(
        "find /home -name '.*' -type f 2>/dev/null | head -20",
        "10_interesting.txt",
        "Hidden files in home directories",
    ),
    c("find /tmp -type f 2>/dev/null | head -20", "10_interesting.txt", "Files in /tmp"),
    c(
        "find /var/tmp -type f 2>/dev/null | head -20",
        "10_interesting.txt",
        "Files in /var/tmp",
    ),
    c("find /opt -type f 2>/dev/null | head -20", "10_interesting.txt", "Files in /opt"),
    c("cat ~/.bash_history", "11_history.txt", "Bash history"),
    c("cat ~/.zsh_history", "11_history.txt", "Zsh history"),
    c(
        "find /home -name '.*history' -exec cat {} \\; 2>/dev/null",
        "11_history.txt",
        "All history files",
    ),
];
