use models::{
    guarantee::Guarantee,
    rental::{RentalPeriod, RentalStatus},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date_begin: DateTime,
    pub expected_date_end: Date,
    pub date_end: Option<Date>, // set when the games come back
    pub renter_first_name: String,
    pub renter_last_name: String,
    pub renter_address: String,
    pub renter_email: String,
    pub renter_phone: String,
    #[sea_orm(column_type = "Text")]
    pub renter_guarantee: Guarantee,
    pub renter_group: Option<String>, // KAP, Cercle, Régio, ...
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub price: Option<i32>, // in units, stored when finished
    pub finished: bool,
    #[sea_orm(column_type = "Text")]
    pub rentor_first: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub rentor_last: Option<String>,
}

impl Model {
    pub fn period(&self) -> RentalPeriod {
        RentalPeriod::new(
            self.date_begin,
            self.expected_date_end,
            self.date_end.filter(|_| self.finished),
        )
    }

    pub fn is_late(&self, today: Date) -> bool {
        self.period().is_late(today)
    }

    pub fn delay(&self, today: Date) -> i64 {
        self.period().delay(today)
    }

    pub fn status(&self, today: Date) -> RentalStatus {
        self.period().status(today)
    }

    pub fn compute_price(&self, number_of_games: u64, today: Date) -> i32 {
        self.period().compute_price(number_of_games, today)
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

// Many-to-many relationship with games
impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        super::location_games::Relation::Game.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::location_games::Relation::Location.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
