//! Plain-text printable sheet of the nearest shelters.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use shelter_core::{format_distance, RankedShelter};
use shelter_geocode::ResolvedLocation;

const EMERGENCY_CONTACTS: [(&str, &str); 4] = [
    ("100", "Police"),
    ("101", "Ambulance"),
    ("102", "Fire Department"),
    ("104", "Municipal Hotline"),
];

const RULE: &str = "------------------------------------------------------------";

/// Renders the printable report.
///
/// # Errors
///
/// Fails when `shelters` is empty; there is nothing to print.
pub(crate) fn render_report(
    location: &ResolvedLocation,
    shelters: &[RankedShelter],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    if shelters.is_empty() {
        anyhow::bail!("no shelter data available to export; search for shelters first");
    }

    let mut out = String::new();
    writeln!(out, "JERUSALEM EMERGENCY SHELTERS")?;
    writeln!(out, "Nearest Shelters to Your Location")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Your Location: {}", location.label)?;
    writeln!(out, "Coordinates:   {}", location.coordinates)?;
    writeln!(
        out,
        "Generated:     {}",
        generated_at.format("%B %-d, %Y, %H:%M UTC")
    )?;
    writeln!(out, "{RULE}")?;

    for ranked in shelters {
        let shelter = &ranked.shelter;
        writeln!(out)?;
        writeln!(
            out,
            "{:>2}. {}  [{}]",
            ranked.rank,
            shelter.address,
            format_distance(ranked.distance_km)
        )?;
        writeln!(out, "    Walking Time:  {}", ranked.walking)?;
        writeln!(out, "    Running Time:  {}", ranked.running)?;
        writeln!(out, "    Capacity:      {}", shelter.capacity)?;
        writeln!(out, "    Area:          {} m\u{b2}", shelter.area)?;
        writeln!(out, "    Neighborhood:  {}", shelter.neighborhood)?;
        writeln!(out, "    Operator:      {}", shelter.operator)?;
    }

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Emergency Contacts")?;
    for (number, service) in EMERGENCY_CONTACTS {
        writeln!(out, "  {number}  {service}")?;
    }
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Important: This information is not a substitute for official emergency \
         information. Always consult official government sources and emergency \
         services for the most current information."
    )?;
    writeln!(
        out,
        "Data source: Jerusalem Municipality | Generated by Jerusalem Shelter Locator"
    )?;

    Ok(out)
}
