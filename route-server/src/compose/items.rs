//! Turn-by-turn path item construction.

use crate::domain::PathItem;
use crate::engine::Maneuver;

/// Builds one path item per maneuver in a section's span.
pub(crate) fn path_items(maneuvers: &[Maneuver], enable_instructions: bool) -> Vec<PathItem> {
    maneuvers
        .iter()
        .enumerate()
        .map(|(idx, maneuver)| {
            let is_last = idx + 1 == maneuvers.len();
            path_item(maneuver, enable_instructions, is_last)
        })
        .collect()
}

fn path_item(maneuver: &Maneuver, enable_instructions: bool, is_last: bool) -> PathItem {
    PathItem {
        name: maneuver.street_names.first().cloned().unwrap_or_default(),
        length_m: maneuver.length_m,
        duration_secs: maneuver.duration_secs,
        direction: maneuver.turn_degrees.map(normalize_turn),
        cycle_lane: maneuver.cycle_lane,
        instruction: if enable_instructions {
            instruction(maneuver, is_last)
        } else {
            None
        },
    }
}

/// Maps a raw compass turn into a signed direction in (−180, 180].
pub(crate) fn normalize_turn(turn_degrees: u32) -> i32 {
    let turn = (turn_degrees % 360) as i32;
    if turn > 180 { turn - 360 } else { turn }
}

/// The engine's narrative text, suffixed with the distance to keep going —
/// except on the last item of a section, where there is nowhere further to
/// go.
fn instruction(maneuver: &Maneuver, is_last: bool) -> Option<String> {
    let text = maneuver.instruction.as_deref().filter(|text| !text.is_empty())?;
    if is_last {
        Some(text.to_owned())
    } else {
        Some(format!(
            "{text} Keep going for {} m.",
            maneuver.length_m as u32
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelMode;

    fn named(name: &str, length_m: f32, instruction: Option<&str>) -> Maneuver {
        Maneuver {
            street_names: vec![name.to_owned()],
            instruction: instruction.map(str::to_owned),
            ..Maneuver::new(TravelMode::Walking, 0, 60, length_m)
        }
    }

    #[test]
    fn one_item_per_maneuver() {
        let maneuvers = vec![named("A", 10.0, None), named("B", 20.0, None)];
        let items = path_items(&maneuvers, false);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "A");
        assert_eq!(items[1].name, "B");
    }

    #[test]
    fn name_is_the_first_alias_or_empty() {
        let mut maneuver = named("Rue Principale", 10.0, None);
        maneuver.street_names.push("D902".to_owned());
        let items = path_items(std::slice::from_ref(&maneuver), false);
        assert_eq!(items[0].name, "Rue Principale");

        maneuver.street_names.clear();
        let items = path_items(&[maneuver], false);
        assert_eq!(items[0].name, "");
    }

    #[test]
    fn suffix_on_every_item_except_the_last() {
        let maneuvers = vec![
            named("A", 222.0, Some("Walk east.")),
            named("B", 667.9, Some("Turn left.")),
            named("C", 445.0, Some("Arrive.")),
        ];
        let items = path_items(&maneuvers, true);
        assert_eq!(
            items[0].instruction.as_deref(),
            Some("Walk east. Keep going for 222 m.")
        );
        // distance is truncated, not rounded
        assert_eq!(
            items[1].instruction.as_deref(),
            Some("Turn left. Keep going for 667 m.")
        );
        assert_eq!(items[2].instruction.as_deref(), Some("Arrive."));
    }

    #[test]
    fn instructions_disabled_yields_none() {
        let maneuvers = vec![named("A", 10.0, Some("Walk east."))];
        let items = path_items(&maneuvers, false);
        assert_eq!(items[0].instruction, None);
    }

    #[test]
    fn missing_or_empty_engine_text_yields_none() {
        let maneuvers = vec![named("A", 10.0, None), named("B", 10.0, Some(""))];
        let items = path_items(&maneuvers, true);
        assert_eq!(items[0].instruction, None);
        assert_eq!(items[1].instruction, None);
    }

    #[test]
    fn turn_is_normalized() {
        let mut maneuver = named("A", 10.0, None);
        maneuver.turn_degrees = Some(270);
        let items = path_items(std::slice::from_ref(&maneuver), false);
        assert_eq!(items[0].direction, Some(-90));
    }

    #[test]
    fn normalize_turn_cases() {
        assert_eq!(normalize_turn(0), 0);
        assert_eq!(normalize_turn(90), 90);
        assert_eq!(normalize_turn(180), 180);
        assert_eq!(normalize_turn(181), -179);
        assert_eq!(normalize_turn(270), -90);
        assert_eq!(normalize_turn(359), -1);
        assert_eq!(normalize_turn(360), 0);
        assert_eq!(normalize_turn(540), 180);
    }

    #[test]
    fn carries_duration_length_and_cycle_lane() {
        use crate::domain::CycleLane;
        let mut maneuver = named("A", 12.5, None);
        maneuver.cycle_lane = Some(CycleLane::Dedicated);
        let items = path_items(&[maneuver], false);
        assert_eq!(items[0].length_m, 12.5);
        assert_eq!(items[0].duration_secs, 60);
        assert_eq!(items[0].cycle_lane, Some(CycleLane::Dedicated));
    }
}
