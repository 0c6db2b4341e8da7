use std::collections::HashMap;
use std::sync::LazyLock;

// Long-form names as delivered by the fixtures feed, mapped to the short
// names shown to users.
const TEAM_NAME_TABLE: [(&str, &str); 24] = [
    ("Arsenal FC", "Arsenal"),
    ("Aston Villa FC", "Aston Villa"),
    ("AFC Bournemouth", "Bournemouth"),
    ("Brentford FC", "Brentford"),
    ("Brighton & Hove Albion FC", "Brighton"),
    ("Burnley FC", "Burnley"),
    ("Chelsea FC", "Chelsea"),
    ("Crystal Palace FC", "Crystal Palace"),
    ("Everton FC", "Everton"),
    ("Fulham FC", "Fulham"),
    ("Leeds United FC", "Leeds United"),
    ("Leicester City FC", "Leicester"),
    ("Liverpool FC", "Liverpool"),
    ("Luton Town FC", "Luton"),
    ("Manchester City FC", "Manchester City"),
    ("Manchester United FC", "Manchester United"),
    ("Newcastle United FC", "Newcastle"),
    ("Nottingham Forest FC", "Nottingham Forest"),
    ("Sheffield United FC", "Sheffield Utd"),
    ("Southampton FC", "Southampton"),
    ("Tottenham Hotspur FC", "Tottenham"),
    ("West Ham United FC", "West Ham"),
    ("Wolverhampton Wanderers FC", "Wolves"),
    ("Sunderland AFC", "Sunderland"),
];

static TEAM_NAMES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| TEAM_NAME_TABLE.iter().copied().collect());

/// Canonical short name for `name`. Exact, case-sensitive lookup; unknown
/// names come back unchanged.
pub fn normalize_team_name(name: &str) -> &str {
    TEAM_NAMES.get(name).copied().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_maps_to_its_short_name() {
        for (raw, short) in TEAM_NAME_TABLE {
            assert_eq!(normalize_team_name(raw), short);
        }
    }

    #[test]
    fn unknown_names_pass_through() {
        for name in ["Real Madrid CF", "Arsenal", "", "  Chelsea FC", "FC Köln"] {
            assert_eq!(normalize_team_name(name), name);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(normalize_team_name("arsenal fc"), "arsenal fc");
        assert_eq!(normalize_team_name("ARSENAL FC"), "ARSENAL FC");
    }

    #[test]
    fn short_names_are_fixed_points() {
        for (_, short) in TEAM_NAME_TABLE {
            assert_eq!(normalize_team_name(short), short);
        }
    }
}
