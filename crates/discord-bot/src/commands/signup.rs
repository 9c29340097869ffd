use serenity::{
    builder::CreateApplicationCommand,
    model::Permissions,
    model::application::command::CommandOptionType,
};

/// Create command for posting a signup roster
pub fn event_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("event")
        .description("Post a signup roster for a new event")
        .dm_permission(false)
        .create_option(|option| {
            option
                .name("name")
                .description("Name of the event")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("times")
                .description("Space-separated slot times, e.g. '18:00 19:30' (up to 10)")
                .kind(CommandOptionType::String)
                .required(true)
        });

    command
}

/// Create command for posting or refreshing the role-selection message
pub fn rolemsg_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("rolemsg")
        .description("Post the role-selection message, or refresh the existing one")
        .dm_permission(false)
        .default_member_permissions(Permissions::ADMINISTRATOR);

    command
}

/// Create command for manually triggering a scheduled auto event
pub fn autoevent_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("autoevent")
        .description("Publish an auto event now instead of waiting for the schedule")
        .dm_permission(false)
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .create_option(|option| {
            option
                .name("target")
                .description("Weekday name or part of a scheduled event name (defaults to today)")
                .kind(CommandOptionType::String)
                .required(false)
        });

    command
}
