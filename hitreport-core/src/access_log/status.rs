use std::ops::{Add, AddAssign};

const TRACKED_CODES: usize = 9;

/// The status codes that get their own report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedStatus {
    Ok,
    NoContent,
    MovedPermanently,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
    ServiceUnavailable,
}

impl TrackedStatus {
    /// Column order of the report.
    pub const ALL: [TrackedStatus; TRACKED_CODES] = [
        TrackedStatus::Ok,
        TrackedStatus::NoContent,
        TrackedStatus::MovedPermanently,
        TrackedStatus::BadRequest,
        TrackedStatus::Unauthorized,
        TrackedStatus::Forbidden,
        TrackedStatus::NotFound,
        TrackedStatus::InternalServerError,
        TrackedStatus::ServiceUnavailable,
    ];

    pub const fn code(self) -> u32 {
        match self {
            TrackedStatus::Ok => 200,
            TrackedStatus::NoContent => 204,
            TrackedStatus::MovedPermanently => 301,
            TrackedStatus::BadRequest => 400,
            TrackedStatus::Unauthorized => 401,
            TrackedStatus::Forbidden => 403,
            TrackedStatus::NotFound => 404,
            TrackedStatus::InternalServerError => 500,
            TrackedStatus::ServiceUnavailable => 503,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Header label, e.g. `Total 404`.
    pub fn label(self) -> String {
        format!("Total {}", self.code())
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Running count per tracked status code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: [u64; TRACKED_CODES],
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts `code` if it is tracked. Returns whether it was.
    pub fn record(&mut self, code: u32) -> bool {
        match TrackedStatus::from_code(code) {
            Some(status) => {
                self.counts[status.index()] += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, status: TrackedStatus) -> u64 {
        self.counts[status.index()]
    }

    /// Sum over all tracked codes.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Counts in column order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackedStatus, u64)> + '_ {
        TrackedStatus::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

impl AddAssign<&StatusTally> for StatusTally {
    fn add_assign(&mut self, rhs: &StatusTally) {
        for (count, other) in self.counts.iter_mut().zip(rhs.counts) {
            *count += other;
        }
    }
}

impl Add for StatusTally {
    type Output = StatusTally;

    fn add(mut self, rhs: StatusTally) -> StatusTally {
        self += &rhs;
        self
    }
}
