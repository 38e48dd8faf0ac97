diesel::table! {
    usuarios (id) {
        id -> Integer,
        nome -> Text,
        email -> Text,
    }
}
