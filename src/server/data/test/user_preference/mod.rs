use super::first_page;
use crate::{
    model::user_preference::Theme,
    server::{
        data::user_preference::{UserPreferenceRepository, SORTABLE_COLUMNS},
        model::user_preference::{
            CreateUserPreferenceParams, UpdateUserPreferenceParams, UserPreferenceFilter,
        },
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
