//! Endpoint paths and query types of the scheduling API.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Exchange username and password for a token pair.
pub const TOKEN: &str = "/auth/token/";

/// Exchange a refresh token for a new access token.
pub const REFRESH: &str = "/auth/refresh/";

/// The authenticated user's record.
pub const CURRENT_USER: &str = "/auth/me/";

/// Unauthenticated account registration.
pub const REGISTER: &str = "/auth/register/";

/// Rooms not occupied in a time range.
pub const FREE_ROOMS: &str = "/rooms/free/";

/// Groups taught by the current teacher.
pub const TEACHER_GROUPS: &str = "/teacher/groups/";

/// Disciplines taught by the current teacher.
pub const TEACHER_DISCIPLINES: &str = "/teacher/disciplines/";

// ============================================================================
// Resources
// ============================================================================

/// A CRUD collection exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Departments,
    Groups,
    Teachers,
    Students,
    Disciplines,
    Rooms,
    Lessons,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Departments,
        Resource::Groups,
        Resource::Teachers,
        Resource::Students,
        Resource::Disciplines,
        Resource::Rooms,
        Resource::Lessons,
    ];

    /// Name used in paths, e.g. `departments`.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Departments => "departments",
            Resource::Groups => "groups",
            Resource::Teachers => "teachers",
            Resource::Students => "students",
            Resource::Disciplines => "disciplines",
            Resource::Rooms => "rooms",
            Resource::Lessons => "lessons",
        }
    }

    /// Path of the collection, e.g. `/departments/`.
    pub fn collection_path(&self) -> String {
        format!("/{}/", self.name())
    }

    /// Path of a single item, e.g. `/departments/4/`.
    pub fn item_path(&self, id: u64) -> String {
        format!("/{}/{}/", self.name(), id)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| {
                InvalidInputError::Other {
                    message: format!("unknown resource '{}'", s),
                }
                .into()
            })
    }
}

// ============================================================================
// Lesson and Room Queries
// ============================================================================

/// Which schedule to fetch lessons for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonFilter {
    Group(u64),
    Teacher(u64),
    Room(u64),
}

impl LessonFilter {
    /// Path of the filtered lesson listing.
    pub fn path(&self) -> &'static str {
        match self {
            LessonFilter::Group(_) => "/lessons/by_group/",
            LessonFilter::Teacher(_) => "/lessons/by_teacher/",
            LessonFilter::Room(_) => "/lessons/by_room/",
        }
    }

    /// Query parameters, with `week` appended when given.
    pub fn params(&self, week: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![match self {
            LessonFilter::Group(id) => ("group_id", id.to_string()),
            LessonFilter::Teacher(id) => ("teacher_id", id.to_string()),
            LessonFilter::Room(id) => ("room_id", id.to_string()),
        }];
        if let Some(week) = week {
            params.push(("week", week.to_string()));
        }
        params
    }
}

/// Room kinds known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Lecture,
    Lab,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Lecture => "lecture",
            RoomType::Lab => "lab",
        }
    }
}

impl FromStr for RoomType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lecture" => Ok(RoomType::Lecture),
            "lab" => Ok(RoomType::Lab),
            other => Err(InvalidInputError::Other {
                message: format!("unknown room type '{}'", other),
            }
            .into()),
        }
    }
}

/// Search parameters for free rooms.
///
/// `start` and `end` are ISO 8601 datetimes; the backend does the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeRoomsQuery {
    pub start: String,
    pub end: String,
    pub room_type: Option<RoomType>,
    pub capacity: Option<u32>,
}

impl FreeRoomsQuery {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            room_type: None,
            capacity: None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("start", self.start.clone()), ("end", self.end.clone())];
        if let Some(room_type) = self.room_type {
            params.push(("type", room_type.as_str().to_string()));
        }
        if let Some(capacity) = self.capacity {
            params.push(("capacity", capacity.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_paths() {
        assert_eq!(Resource::Disciplines.collection_path(), "/disciplines/");
        assert_eq!(Resource::Rooms.item_path(12), "/rooms/12/");
    }

    #[test]
    fn resource_round_trips_through_name() {
        for resource in Resource::ALL {
            assert_eq!(resource.name().parse::<Resource>().unwrap(), resource);
        }
        assert!("buildings".parse::<Resource>().is_err());
    }

    #[test]
    fn lesson_filter_params() {
        assert_eq!(
            LessonFilter::Teacher(5).params(Some(3)),
            vec![("teacher_id", "5".to_string()), ("week", "3".to_string())]
        );
        assert_eq!(
            LessonFilter::Room(9).params(None),
            vec![("room_id", "9".to_string())]
        );
    }

    #[test]
    fn free_rooms_optional_params() {
        let mut query = FreeRoomsQuery::new("2024-09-02T08:30", "2024-09-02T10:00");
        assert_eq!(query.params().len(), 2);

        query.room_type = Some(RoomType::Lab);
        query.capacity = Some(25);
        let params = query.params();
        assert_eq!(params[2], ("type", "lab".to_string()));
        assert_eq!(params[3], ("capacity", "25".to_string()));
    }
}
