use chrono::{DateTime, Duration, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn expires_in_minutes(minutes: i64) -> DateTime<Utc> {
    now() + Duration::minutes(minutes)
}
