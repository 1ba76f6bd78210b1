//! Event database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use crate::domain::{Event, EventType, NewEvent};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `summer` or `winter`
    #[sea_orm(column_name = "type")]
    pub event_type: String,
    pub year: i32,
    pub country: String,
    pub host: String,
    pub noc: String,
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub duration: Option<i32>,
    pub disabilities_included: Option<String>,
    pub countries: Option<i32>,
    pub events: Option<i32>,
    pub sports: Option<i32>,
    pub participants_m: Option<i32>,
    pub participants_f: Option<i32>,
    pub participants: Option<i32>,
    pub highlights: Option<String>,
    pub url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::Noc",
        to = "super::region::Column::Noc"
    )]
    Region,
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Event {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Event {
            id: model.id,
            event_type: model.event_type.parse::<EventType>()?,
            year: model.year,
            country: model.country,
            host: model.host,
            noc: model.noc,
            start: model.start,
            end: model.end,
            duration: model.duration,
            disabilities_included: model.disabilities_included,
            countries: model.countries,
            events: model.events,
            sports: model.sports,
            participants_m: model.participants_m,
            participants_f: model.participants_f,
            participants: model.participants,
            highlights: model.highlights,
            url: model.url,
        })
    }
}

/// Active model for inserting a new event; the id is assigned by the database
impl From<NewEvent> for ActiveModel {
    fn from(event: NewEvent) -> Self {
        ActiveModel {
            id: NotSet,
            event_type: Set(event.event_type.to_string()),
            year: Set(event.year),
            country: Set(event.country),
            host: Set(event.host),
            noc: Set(event.noc),
            start: Set(event.start),
            end: Set(event.end),
            duration: Set(event.duration),
            disabilities_included: Set(event.disabilities_included),
            countries: Set(event.countries),
            events: Set(event.events),
            sports: Set(event.sports),
            participants_m: Set(event.participants_m),
            participants_f: Set(event.participants_f),
            participants: Set(event.participants),
            highlights: Set(event.highlights),
            url: Set(event.url),
        }
    }
}

/// Active model overwriting every column of an existing event
impl From<Event> for ActiveModel {
    fn from(event: Event) -> Self {
        ActiveModel {
            id: Set(event.id),
            event_type: Set(event.event_type.to_string()),
            year: Set(event.year),
            country: Set(event.country),
            host: Set(event.host),
            noc: Set(event.noc),
            start: Set(event.start),
            end: Set(event.end),
            duration: Set(event.duration),
            disabilities_included: Set(event.disabilities_included),
            countries: Set(event.countries),
            events: Set(event.events),
            sports: Set(event.sports),
            participants_m: Set(event.participants_m),
            participants_f: Set(event.participants_f),
            participants: Set(event.participants),
            highlights: Set(event.highlights),
            url: Set(event.url),
        }
    }
}
