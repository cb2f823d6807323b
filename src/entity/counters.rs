use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "counters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub counter_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cashiers::Entity")]
    Cashiers,
}

impl Related<super::cashiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cashiers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
