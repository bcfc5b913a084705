pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }

    // e.g. 2022-09-24T04:40:35.726029, always UTC
    fn time_to_json(t: NaiveDateTime) -> String {
        t.format(DATE_FMT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::serializer;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "serializer")]
        at: NaiveDateTime,
    }

    #[tokio::test]
    async fn test_should_serialize_date() {
        let at = NaiveDate::from_ymd_opt(2022, 9, 24).and_then(|d| d.and_hms_micro_opt(4, 40, 35, 726029))
            .expect("valid date");
        let json = serde_json::to_string(&Stamped { at }).expect("serialize");
        assert_eq!("{\"at\":\"2022-09-24T04:40:35.726029\"}", json.as_str());
        let parsed: Stamped = serde_json::from_str(&json).expect("parse");
        assert_eq!(at, parsed.at);
    }

    #[tokio::test]
    async fn test_should_reject_bad_date() {
        assert!(serde_json::from_str::<Stamped>("{\"at\":\"yesterday\"}").is_err());
    }
}
