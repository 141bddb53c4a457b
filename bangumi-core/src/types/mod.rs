//! 类型定义模块
//!
//! 远端 JSON 结构的本地映射。字段缺失或为 `null` 时统一回落到默认值，
//! 界面层因此不必处理半残的记录。

mod calendar;
mod collection;
mod episode;
mod response;
mod search;
mod subject;
mod user;

pub use calendar::{CalendarCollection, CalendarDay, CalendarItem, CalendarRating, Weekday};
pub use collection::{CollectionStatus, CollectionUpdate, Entry};
pub use episode::{Episode, EpisodeCollectionType, EpisodesPatch, UserEpisode};
pub use response::Paged;
pub use search::{SearchFilter, SearchPayload, SearchSort};
pub use subject::{Rating, SlimSubject, Subject, SubjectStats, SubjectType, Tag};
pub use user::UserInfo;

use serde::{Deserialize, Deserializer};

/// `null` 视为默认值
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
