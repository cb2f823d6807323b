use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub employee_id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub phone: Option<String>,
    pub salary: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::cashiers::Entity")]
    Cashiers,
    #[sea_orm(has_one = "super::consultants::Entity")]
    Consultants,
}

impl Related<super::cashiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cashiers.def()
    }
}

impl Related<super::consultants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Consultants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
