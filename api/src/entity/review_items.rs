use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "review_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub target_statement_id: Uuid,
    pub kind: String,
    pub state: String,
    pub outcome: Option<String>,
    pub detector_id: Uuid,
    pub reason: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub proposed_text: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub previous_text: Option<String>,
    pub duplicate_of: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub resolved_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::statements::Entity",
        from = "Column::TargetStatementId",
        to = "super::statements::Column::Id"
    )]
    Target,
    #[sea_orm(has_many = "super::review_votes::Entity")]
    Votes,
}

impl Related<super::statements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Target.def()
    }
}

impl Related<super::review_votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
