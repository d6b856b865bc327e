use sea_orm::entity::prelude::*;

/// A guest record. Dates and times are stored as ISO strings
/// ("YYYY-MM-DD" / "HH:MM:SS") so range filters can compare them
/// lexicographically; `stay_time` is a duration, not a clock time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub guest_type_id: i32,

    /// Owning user. Only the inviter may update or delete the record.
    pub inviter_id: i32,

    pub coming_date: String,

    pub coming_time: String,

    pub stay_time: String,

    /// Derived: arrival instant + stay duration, split back into date/time.
    pub exit_date: String,

    pub exit_time: String,

    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guest_types::Entity",
        from = "Column::GuestTypeId",
        to = "super::guest_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    GuestTypes,

    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InviterId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::guest_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuestTypes.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
