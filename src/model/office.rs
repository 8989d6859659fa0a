use chrono::NaiveTime;

/// A point on the globe in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Registered office. Managed outside this service; read-only here.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Office {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Scheduled start of the working day (local time).
    pub check_in_time: NaiveTime,
    /// Scheduled end of the working day (local time).
    pub check_out_time: NaiveTime,
}

impl Office {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
