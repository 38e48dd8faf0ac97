use diesel::prelude::*;

#[derive(serde::Serialize, Queryable, Selectable)]
#[diesel(table_name = crate::schema::usuarios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Usuario {
    pub id: i32,
    pub nome: String,
    pub email: String,
}

#[derive(serde::Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::usuarios)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
}
