use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub nickname: String,
    pub public_nickname: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub api_key_hash: Option<String>,
    pub user_group: String,
    pub reputation: i32,
    pub created_at: DateTimeWithTimeZone,
    pub last_login_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::statements::Entity")]
    Statements,
    #[sea_orm(has_many = "super::reputation_events::Entity")]
    ReputationEvents,
}

impl Related<super::statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statements.def()
    }
}

impl Related<super::reputation_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReputationEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
