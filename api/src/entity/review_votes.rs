use sea_orm::entity::prelude::*;

/// `(review_id, reviewer_id)` carries a unique index
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "review_votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub review_id: Uuid,
    pub reviewer_id: Uuid,
    pub is_okay: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::review_items::Entity",
        from = "Column::ReviewId",
        to = "super::review_items::Column::Id"
    )]
    Review,
}

impl Related<super::review_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
