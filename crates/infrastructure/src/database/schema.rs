// Database schema for the tutorial content service
diesel::table! {
    contents (id) {
        id -> Text,                // UUID assigned at creation
        title -> Text,
        description -> Text,
        video -> Text,             // Video reference (URL or media key)
    }
}

diesel::table! {
    ratings (id) {
        id -> Text,
        content_id -> Text,        // References contents.id
        user_id -> Text,
        score -> Integer,
    }
}

diesel::table! {
    users (id) {
        id -> Text,
        username -> Text,
        email -> Text,
        admin -> Bool,
    }
}

diesel::joinable!(ratings -> contents (content_id));

diesel::allow_tables_to_appear_in_same_query!(contents, ratings, users,);
