use cafefind_core::AnnotatedVenue;

/// Human-readable distance: whole meters below 1 km, else km to 2 places.
pub(crate) fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.2} km")
    }
}

/// Render one venue as an indented block. Absent fields are left out.
pub(crate) fn render_venue(position: usize, annotated: &AnnotatedVenue) -> String {
    let venue = &annotated.venue;
    let mut lines = vec![format!("{position}. {}", venue.name)];

    let fields = [
        ("Address", venue.address.clone()),
        ("Opening Hours", venue.opening_hours.clone()),
        ("Phone", venue.phone.clone()),
        ("Website", venue.website.clone()),
        ("Distance", venue.distance_km.map(format_distance)),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("   {label}: {value}"));
        }
    }
    lines.push(format!("   Status: {}", annotated.open_state.label()));

    lines.join("\n")
}

pub(crate) fn print_venues(venues: &[AnnotatedVenue]) {
    for (i, venue) in venues.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", render_venue(i + 1, venue));
    }
}
