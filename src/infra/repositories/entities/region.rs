//! Region database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Region;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "region")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub noc: String,
    pub region: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Region {
    fn from(model: Model) -> Self {
        Region {
            noc: model.noc,
            region: model.region,
            notes: model.notes,
        }
    }
}

/// Full active model for inserting a domain region
impl From<Region> for ActiveModel {
    fn from(region: Region) -> Self {
        ActiveModel {
            noc: Set(region.noc),
            region: Set(region.region),
            notes: Set(region.notes),
        }
    }
}
