use serenity::builder::CreateApplicationCommands;

pub mod signup;

/// Register all commands for the bot.
///
/// This function creates and registers all of the slash commands that the bot
/// will respond to, including their options, descriptions, and permissions.
///
/// # Arguments
///
/// * `commands` - A mutable reference to a CreateApplicationCommands object
///                that will be modified to include our custom commands.
///
/// # Returns
///
/// The same CreateApplicationCommands object with our commands added.
pub fn register_commands(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    // Create the event command
    commands.create_application_command(|command| {
        *command = signup::event_command();
        command
    });

    // Create the rolemsg command
    commands.create_application_command(|command| {
        *command = signup::rolemsg_command();
        command
    });

    // Create the autoevent command
    commands.create_application_command(|command| {
        *command = signup::autoevent_command();
        command
    });

    commands
}
