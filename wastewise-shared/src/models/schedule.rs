/// Collection schedule entries
///
/// A schedule entry is a planned pickup for an area. Only `status` changes
/// after creation, and any status may move to any other status.
///
/// # JSON shape
///
/// ```json
/// {
///   "id": "sch-001",
///   "area": "Main St Area",
///   "collectionDate": "2023-10-26",
///   "collectionTime": "08:00",
///   "status": "scheduled"
/// }
/// ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a scheduled collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Collected,
    Rescheduled,
    Cancelled,
}

impl ScheduleStatus {
    /// All statuses, in display order
    pub const ALL: [ScheduleStatus; 4] = [
        ScheduleStatus::Scheduled,
        ScheduleStatus::Collected,
        ScheduleStatus::Rescheduled,
        ScheduleStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Collected => "collected",
            ScheduleStatus::Rescheduled => "rescheduled",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown schedule status: {}", s))
    }
}

/// A planned collection for an area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Identifier, `sch-` prefixed
    pub id: String,

    /// Service area name
    pub area: String,

    pub collection_date: NaiveDate,

    /// Time of day, serialized as `HH:MM`
    #[serde(with = "hour_minute")]
    pub collection_time: NaiveTime,

    pub status: ScheduleStatus,

    /// Collector assigned to this pickup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_id: Option<String>,
}

/// Request body for changing an entry's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateScheduleStatus {
    pub status: ScheduleStatus,
}

/// `HH:MM` serde representation for [`NaiveTime`]
mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!("collected".parse::<ScheduleStatus>(), Ok(ScheduleStatus::Collected));
        assert!("lost".parse::<ScheduleStatus>().is_err());
    }

    #[test]
    fn test_entry_json_shape() {
        let entry: ScheduleEntry = serde_json::from_value(serde_json::json!({
            "id": "sch-001",
            "area": "Main St Area",
            "collectionDate": "2023-10-26",
            "collectionTime": "08:00",
            "status": "scheduled"
        }))
        .unwrap();

        assert_eq!(entry.collection_date, NaiveDate::from_ymd_opt(2023, 10, 26).unwrap());
        assert_eq!(entry.collection_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(entry.collector_id, None);

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["collectionTime"], "08:00");
        assert!(json.get("collectorId").is_none());
    }

    #[test]
    fn test_entry_rejects_bad_time() {
        let result: Result<ScheduleEntry, _> = serde_json::from_value(serde_json::json!({
            "id": "sch-009",
            "area": "Nowhere",
            "collectionDate": "2023-10-26",
            "collectionTime": "8 o'clock",
            "status": "scheduled"
        }));

        assert!(result.is_err());
    }
}
