use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub status: String,
    pub season_id: Option<i32>,
    pub mal_id: Option<i32>,
    pub anilist_id: Option<i32>,
    /// Provider-derived broadcast fact as JSON.
    pub broadcast: Option<String>,
    /// Admin-entered broadcast fact as JSON.
    pub broadcast_override: Option<String>,
    pub schedule_active: bool,
    pub sort_order: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
