//! Memory affinity ranking
//!
//! Ranks skills by how often the user's long-term "Fan Profile" memory
//! mentions them. Memory never marks a skill explicit; it only fills in when
//! the prompt itself carries no lexical signal.

use regex::Regex;
use std::sync::OnceLock;

use crate::routing::tables::RoutingTables;
use crate::routing::text::{count_word_hits, normalize};

fn fan_profile_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[ \t]*#{1,6}[ \t]*fan profile\b.*$").expect("static regex is valid")
    })
}

fn any_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]").expect("static regex is valid"))
}

/// Extract the body of the "Fan Profile" section from a memory block.
///
/// The section starts after the first markdown heading whose text begins with
/// "fan profile" and ends at the next markdown heading, or at the end of the
/// block when none follows. Returns `None` when the block has no such section.
pub fn extract_fan_profile(memory: &str) -> Option<&str> {
    let header = fan_profile_header().find(memory)?;
    let body = &memory[header.end()..];
    let end = any_header().find(body).map(|m| m.start()).unwrap_or(body.len());
    Some(&body[..end])
}

/// Rank installed non-helper skills by Fan Profile affinity.
///
/// The affinity of a skill is the raw hit count of its name plus all of its
/// aliases inside the Fan Profile section. Zero-affinity skills are dropped;
/// the result is sorted by descending affinity, ties in discovery order.
pub fn rank_memory_affinity(
    memory: Option<&str>,
    installed: &[String],
    tables: &RoutingTables,
) -> Vec<(String, usize)> {
    let Some(section) = memory.and_then(extract_fan_profile) else {
        return Vec::new();
    };
    let section = normalize(section);

    let mut ranked: Vec<(String, usize)> = Vec::new();
    for skill in installed {
        if tables.is_helper(skill) || ranked.iter().any(|(s, _)| s == skill) {
            continue;
        }

        let affinity = count_word_hits(&section, skill)
            + tables
                .aliases_for(skill)
                .iter()
                .map(|alias| count_word_hits(&section, alias))
                .sum::<usize>();

        if affinity > 0 {
            ranked.push((skill.clone(), affinity));
        }
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
