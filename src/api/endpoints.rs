// PostgREST URL and query-string builders for the predictions table.

use super::client::PredictionQuery;

pub const REST_PATH: &str = "/rest/v1";

pub fn table_url(base_url: &str, table: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), REST_PATH, table)
}

/// Query parameters for a predictions read: all columns, optional league
/// equality filter, ascending by match date.
pub fn query_params(query: &PredictionQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];
    if let Some(league) = query.league {
        params.push(("league", format!("eq.{}", league.name())));
    }
    params.push(("order", "date.asc".to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::League;

    #[test]
    fn table_url_tolerates_trailing_slash() {
        assert_eq!(
            table_url("https://abc.supabase.co/", "predictions"),
            "https://abc.supabase.co/rest/v1/predictions"
        );
    }

    #[test]
    fn league_filter_is_optional() {
        let filtered = PredictionQuery::new("predictions", Some(League::LaLiga));
        assert_eq!(
            query_params(&filtered),
            vec![
                ("select", "*".to_string()),
                ("league", "eq.La Liga".to_string()),
                ("order", "date.asc".to_string()),
            ]
        );

        let unfiltered = PredictionQuery::new("predictions", None);
        assert!(query_params(&unfiltered).iter().all(|(k, _)| *k != "league"));
    }
}
