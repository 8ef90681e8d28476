use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub players_min: i32,
    pub players_max: i32,
    pub duration_min: i32, // minutes
    pub duration_max: i32,
    pub picture: Option<String>, // e.g. "photos/catan.jpg"
    pub nb_rented: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub date: DateTime,
    pub is_rented: bool,
}

impl Model {
    pub fn players(&self) -> String {
        models::game::players(self.players_min, self.players_max)
    }

    pub fn duration(&self) -> String {
        models::game::duration(self.duration_min, self.duration_max)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::location_games::Entity")]
    LocationGames,
}

impl Related<super::location_games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LocationGames.def()
    }
}

// Many-to-many relationship with locations
impl Related<super::locations::Entity> for Entity {
    fn to() -> RelationDef {
        super::location_games::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::location_games::Relation::Game.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
