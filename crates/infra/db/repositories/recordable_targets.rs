use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, dsl::count_star, pg::Pg, prelude::*};
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    domain,
    infra::db::{
        postgres::{
            postgres_connection::PgPoolSquad,
            schema::{categories, channels, episodes, groups, playlists, series},
        },
        repositories::contains_pattern,
    },
};
use domain::{
    entities::{channels::ChannelEntity, episodes::EpisodeEntity, series::SeriesEntity},
    repositories::recordable_targets::RecordableTargetRepository,
    value_objects::{
        enums::sort_order::SortOrder,
        recordable_targets::{
            ChannelId, ChannelPickerRow, EpisodeId, EpisodePickerRow, ListTargetsFilter, SeriesId,
            SeriesPickerRow, TargetLabel,
        },
    },
};

pub struct RecordableTargetPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RecordableTargetPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn to_labels(rows: Vec<(i64, String)>) -> Vec<TargetLabel> {
    rows.into_iter()
        .map(|(id, label)| TargetLabel { id, label })
        .collect()
}

// A disabled or foreign target must not match, so the resolver reports it as not found.
fn channel_lookup(user_id: Uuid, channel_id: ChannelId) -> channels::BoxedQuery<'static, Pg> {
    channels::table
        .filter(channels::id.eq(channel_id.0))
        .filter(channels::user_id.eq(user_id))
        .filter(channels::enabled.eq(true))
        .into_boxed()
}

// Episodes carry no enabled flag.
fn episode_lookup(user_id: Uuid, episode_id: EpisodeId) -> episodes::BoxedQuery<'static, Pg> {
    episodes::table
        .filter(episodes::id.eq(episode_id.0))
        .filter(episodes::user_id.eq(user_id))
        .into_boxed()
}

fn series_lookup(user_id: Uuid, series_id: SeriesId) -> series::BoxedQuery<'static, Pg> {
    series::table
        .filter(series::id.eq(series_id.0))
        .filter(series::user_id.eq(user_id))
        .filter(series::enabled.eq(true))
        .into_boxed()
}

#[async_trait]
impl RecordableTargetRepository for RecordableTargetPostgres {
    async fn find_channel(
        &self,
        user_id: Uuid,
        channel_id: ChannelId,
    ) -> Result<Option<ChannelEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = channel_lookup(user_id, channel_id)
            .select(ChannelEntity::as_select())
            .first::<ChannelEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_episode(
        &self,
        user_id: Uuid,
        episode_id: EpisodeId,
    ) -> Result<Option<EpisodeEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = episode_lookup(user_id, episode_id)
            .select(EpisodeEntity::as_select())
            .first::<EpisodeEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_series(
        &self,
        user_id: Uuid,
        series_id: SeriesId,
    ) -> Result<Option<SeriesEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = series_lookup(user_id, series_id)
            .select(SeriesEntity::as_select())
            .first::<SeriesEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_channels(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<ChannelPickerRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = channels::table
            .inner_join(playlists::table.on(channels::playlist_id.eq(playlists::id)))
            .left_join(groups::table.on(channels::group_id.eq(groups::id.nullable())))
            .filter(channels::user_id.eq(user_id))
            .filter(channels::enabled.eq(true))
            .select((
                channels::id,
                channels::title,
                playlists::name,
                groups::name.nullable(),
                channels::stream_icon,
            ))
            .into_boxed();

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query = query.filter(
                channels::title
                    .ilike(pattern.clone())
                    .or(playlists::name.ilike(pattern)),
            );
        }

        if let Some(playlist_id) = filter.playlist_id {
            query = query.filter(channels::playlist_id.eq(playlist_id));
        }

        if let Some(group_id) = filter.group_id {
            query = query.filter(channels::group_id.eq(group_id));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query.order(channels::title.asc()),
            SortOrder::Desc => query.order(channels::title.desc()),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.load::<(i64, String, String, Option<String>, Option<String>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(id, title, playlist_name, group_name, stream_icon)| ChannelPickerRow {
                    id,
                    title,
                    playlist_name,
                    group_name,
                    has_logo: stream_icon.is_some_and(|icon| !icon.trim().is_empty()),
                },
            )
            .collect())
    }

    async fn list_episodes(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<EpisodePickerRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = episodes::table
            .inner_join(series::table.on(episodes::series_id.eq(series::id)))
            .inner_join(playlists::table.on(series::playlist_id.eq(playlists::id)))
            .filter(episodes::user_id.eq(user_id))
            .select((
                episodes::id,
                episodes::title,
                episodes::series_id,
                series::name,
                playlists::name,
                episodes::season,
                episodes::episode_num,
            ))
            .into_boxed();

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query = query.filter(
                episodes::title
                    .ilike(pattern.clone())
                    .or(series::name.ilike(pattern)),
            );
        }

        if let Some(playlist_id) = filter.playlist_id {
            query = query.filter(series::playlist_id.eq(playlist_id));
        }

        if let Some(series_id) = filter.series_id {
            query = query.filter(episodes::series_id.eq(series_id));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query
                .order(series::name.asc())
                .then_order_by(episodes::season.asc())
                .then_order_by(episodes::episode_num.asc()),
            SortOrder::Desc => query
                .order(series::name.desc())
                .then_order_by(episodes::season.desc())
                .then_order_by(episodes::episode_num.desc()),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.load::<(
            i64,
            String,
            i64,
            String,
            String,
            Option<i32>,
            Option<i32>,
        )>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(
                |(id, title, series_id, series_name, playlist_name, season, episode_num)| {
                    EpisodePickerRow {
                        id,
                        title,
                        series_id,
                        series_name,
                        playlist_name,
                        season,
                        episode_num,
                    }
                },
            )
            .collect())
    }

    async fn list_series(
        &self,
        user_id: Uuid,
        filter: ListTargetsFilter,
    ) -> Result<Vec<SeriesPickerRow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = series::table
            .inner_join(playlists::table.on(series::playlist_id.eq(playlists::id)))
            .left_join(categories::table.on(series::category_id.eq(categories::id.nullable())))
            .filter(series::user_id.eq(user_id))
            .filter(series::enabled.eq(true))
            .select((
                series::id,
                series::name,
                playlists::name,
                categories::name.nullable(),
            ))
            .into_boxed();

        if let Some(pattern) = contains_pattern(filter.search.as_deref()) {
            query = query.filter(
                series::name
                    .ilike(pattern.clone())
                    .or(playlists::name.ilike(pattern)),
            );
        }

        if let Some(playlist_id) = filter.playlist_id {
            query = query.filter(series::playlist_id.eq(playlist_id));
        }

        if let Some(category_id) = filter.category_id {
            query = query.filter(series::category_id.eq(category_id));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query.order(series::name.asc()),
            SortOrder::Desc => query.order(series::name.desc()),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let rows = query.load::<(i64, String, String, Option<String>)>(&mut conn)?;

        let series_ids: Vec<i64> = rows.iter().map(|(id, ..)| *id).collect();
        let episodes_count: HashMap<i64, i64> = episodes::table
            .filter(episodes::series_id.eq_any(series_ids))
            .group_by(episodes::series_id)
            .select((episodes::series_id, count_star()))
            .load::<(i64, i64)>(&mut conn)?
            .into_iter()
            .collect();

        Ok(rows
            .into_iter()
            .map(|(id, name, playlist_name, category_name)| SeriesPickerRow {
                id,
                name,
                playlist_name,
                category_name,
                episodes_count: episodes_count.get(&id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn channel_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = channels::table
            .filter(channels::user_id.eq(user_id))
            .filter(channels::id.eq_any(ids))
            .select((channels::id, channels::title))
            .load::<(i64, String)>(&mut conn)?;

        Ok(to_labels(rows))
    }

    async fn episode_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = episodes::table
            .filter(episodes::user_id.eq(user_id))
            .filter(episodes::id.eq_any(ids))
            .select((episodes::id, episodes::title))
            .load::<(i64, String)>(&mut conn)?;

        Ok(to_labels(rows))
    }

    async fn series_labels(&self, user_id: Uuid, ids: Vec<i64>) -> Result<Vec<TargetLabel>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Series rows carry `name`, not `title`.
        let rows = series::table
            .filter(series::user_id.eq(user_id))
            .filter(series::id.eq_any(ids))
            .select((series::id, series::name))
            .load::<(i64, String)>(&mut conn)?;

        Ok(to_labels(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn channel_lookup_requires_owner_and_enabled() {
        let user_id = Uuid::new_v4();
        let sql = debug_query::<Pg, _>(&channel_lookup(user_id, ChannelId(7))).to_string();

        assert!(sql.contains(r#""channels"."id" = $1"#), "{sql}");
        assert!(sql.contains(r#""channels"."user_id" = $2"#), "{sql}");
        assert!(sql.contains(r#""channels"."enabled" = $3"#), "{sql}");
        assert!(sql.contains(&format!("binds: [7, {user_id}, true]")), "{sql}");
    }

    #[test]
    fn series_lookup_requires_owner_and_enabled() {
        let user_id = Uuid::new_v4();
        let sql = debug_query::<Pg, _>(&series_lookup(user_id, SeriesId(42))).to_string();

        assert!(sql.contains(r#""series"."user_id" = $2"#), "{sql}");
        assert!(sql.contains(r#""series"."enabled" = $3"#), "{sql}");
        assert!(sql.contains(&format!("binds: [42, {user_id}, true]")), "{sql}");
    }

    #[test]
    fn episode_lookup_is_owner_scoped_only() {
        let user_id = Uuid::new_v4();
        let sql = debug_query::<Pg, _>(&episode_lookup(user_id, EpisodeId(3))).to_string();

        assert!(sql.contains(r#""episodes"."user_id" = $2"#), "{sql}");
        assert!(!sql.contains("enabled"), "{sql}");
    }
}
