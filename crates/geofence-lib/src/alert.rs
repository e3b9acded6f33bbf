//! Human-readable alert derived from an event record.

use crate::record::EventRecord;

/// Subject and body handed to an [`AlertPublisher`](crate::AlertPublisher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub subject: String,
    pub message: String,
}

impl Alert {
    /// Render the alert for a record.
    ///
    /// The message carries the device identity, the reported coordinates,
    /// the verdict and the rounded distance, one per line.
    pub fn from_record(record: &EventRecord) -> Self {
        let point = record.point();
        let verdict = if record.inside() { "YES" } else { "NO" };

        let message = format!(
            "Geofence Alert for Device: {device}\n\
             Location: ({lat}, {lon})\n\
             Inside Geofence: {verdict}\n\
             Distance: {distance:.2} meters",
            device = record.device_id(),
            lat = point.lat(),
            lon = point.lon(),
            distance = record.distance_meters(),
        );

        Self {
            subject: format!("Geofence Alert: {}", record.device_id()),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EvaluationResult, EventRecordBuilder, GeoPoint};

    #[test]
    fn renders_outside_alert() {
        let record = EventRecordBuilder::new().build(
            GeoPoint::new(40.76, -73.984).unwrap(),
            "truck-12",
            &EvaluationResult {
                distance_meters: 5566.11,
                inside: false,
            },
        );

        let alert = Alert::from_record(&record);
        assert_eq!(alert.subject, "Geofence Alert: truck-12");
        assert_eq!(
            alert.message,
            "Geofence Alert for Device: truck-12\n\
             Location: (40.76, -73.984)\n\
             Inside Geofence: NO\n\
             Distance: 5566.11 meters"
        );
    }

    #[test]
    fn inside_verdict_and_padded_distance() {
        let record = EventRecordBuilder::new().build(
            GeoPoint::new(40.7128, -74.006).unwrap(),
            "unknown",
            &EvaluationResult {
                distance_meters: 0.0,
                inside: true,
            },
        );

        let alert = Alert::from_record(&record);
        assert!(alert.message.contains("Inside Geofence: YES"));
        assert!(alert.message.ends_with("Distance: 0.00 meters"));
    }
}
