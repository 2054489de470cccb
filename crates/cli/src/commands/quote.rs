//! Custom bouquet quotes.

use bloom_haven_core::pricing::{AddOn, AddOns, FoamType, MIN_WRAPPERS, NoteValue};
use bloom_haven_core::{PricingConfig, compute_total};

/// Build a configuration from command-line flags.
///
/// With no `--add-on` flags every add-on is included, as on the site.
#[must_use]
pub fn config(
    pieces: u32,
    note_value: NoteValue,
    wrappers: u32,
    foam: FoamType,
    add_ons: &[AddOn],
    no_add_ons: bool,
) -> PricingConfig {
    let add_ons = if no_add_ons {
        AddOns::none()
    } else if add_ons.is_empty() {
        AddOns::all()
    } else {
        add_ons
            .iter()
            .fold(AddOns::none(), |set, a| set.with(*a, true))
    };

    PricingConfig {
        pieces,
        note_value,
        wrappers: wrappers.max(MIN_WRAPPERS),
        foam,
        add_ons,
    }
    .clamped()
}

/// Print the price breakdown for `config`.
///
/// # Errors
///
/// Returns an error if the breakdown cannot be serialized to JSON.
#[allow(clippy::print_stdout)]
pub fn print(config: &PricingConfig, json: bool) -> Result<(), serde_json::Error> {
    let breakdown = compute_total(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!(
        "{} x {} notes, {} foam",
        breakdown.config.pieces, breakdown.config.note_value, breakdown.config.foam
    );
    println!("  {:<20} {:>12}", "Money", breakdown.money_value.to_string());
    for (name, price) in breakdown.material_lines() {
        println!("  {:<20} {:>12}", name, price.to_string());
    }
    println!("  {:<20} {:>12}", "Workmanship", breakdown.workmanship.to_string());
    println!("  {:<20} {:>12}", "Total", breakdown.total.to_string());
    Ok(())
}
