table! {
    articles (article_id) {
        article_id -> Int4,
        title -> Text,
        topic -> Text,
        author -> Text,
        body -> Text,
        created_at -> Timestamp,
        votes -> Int4,
        article_img_url -> Text,
    }
}

table! {
    comments (comment_id) {
        comment_id -> Int4,
        body -> Text,
        article_id -> Int4,
        author -> Text,
        votes -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    topics (slug) {
        slug -> Text,
        description -> Text,
    }
}

table! {
    users (username) {
        username -> Text,
        name -> Text,
        avatar_url -> Text,
    }
}

joinable!(articles -> topics (topic));
joinable!(articles -> users (author));
joinable!(comments -> articles (article_id));
joinable!(comments -> users (author));

allow_tables_to_appear_in_same_query!(articles, comments, topics, users);
