// @generated by mapgen. Do not edit.

diesel::table! {
    t_coffee (id) {
        id -> BigInt,
        /// Display name
        name -> Nullable<Varchar>,
        /// Price in minor units
        price -> BigInt,
        create_time -> Nullable<Timestamp>,
        update_time -> Nullable<Timestamp>,
    }
}
