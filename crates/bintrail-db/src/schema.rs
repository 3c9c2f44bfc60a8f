diesel::table! {
    repositories (id) {
        id -> Integer,
        project -> Text,
        name -> Text,
    }
}

diesel::table! {
    packages (id) {
        id -> Integer,
        project -> Text,
        name -> Text,
    }
}

diesel::table! {
    product_media (id) {
        id -> Integer,
        repository_id -> Integer,
        medium -> Text,
        product -> Text,
        version -> Nullable<Text>,
    }
}

diesel::table! {
    binary_releases (id) {
        id -> Integer,
        repository_id -> Integer,
        name -> Nullable<Text>,
        version -> Nullable<Text>,
        release -> Nullable<Text>,
        epoch -> Nullable<Text>,
        arch -> Nullable<Text>,
        medium -> Nullable<Text>,
        disturl -> Nullable<Text>,
        supportstatus -> Nullable<Text>,
        buildtime -> Nullable<BigInt>,
        releasetime -> Text,
        obsolete_time -> Nullable<Text>,
        operation -> Text,
        updateinfo_id -> Nullable<Text>,
        updateinfo_version -> Nullable<Text>,
        maintainer -> Nullable<Text>,
        release_package_id -> Nullable<Integer>,
    }
}

diesel::joinable!(binary_releases -> repositories (repository_id));
diesel::joinable!(binary_releases -> packages (release_package_id));
diesel::joinable!(product_media -> repositories (repository_id));

diesel::allow_tables_to_appear_in_same_query!(repositories, packages, product_media, binary_releases,);
