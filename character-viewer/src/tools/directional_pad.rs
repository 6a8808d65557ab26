use bevy::prelude::*;

use super::input::{InputFlags, MoveDirection, PointerCapture};

const BUTTON_SIZE: f32 = 44.0;
const IDLE_COLOR: Color = Color::srgba(0.10, 0.11, 0.13, 0.75);
const HELD_COLOR: Color = Color::srgba(0.30, 0.34, 0.40, 0.90);

#[derive(Component)]
pub struct DirectionalPadRoot;

/// On-screen button mirroring one arrow key.
#[derive(Component, Debug)]
pub struct DirectionalButton {
    pub direction: MoveDirection,
    pub held: bool,
}

/// New held state for a button, or `None` when nothing changed.
///
/// Pressing activates; any release, over the button or elsewhere, deactivates.
pub fn pointer_transition(held: bool, interaction: Interaction) -> Option<bool> {
    match (held, interaction) {
        (false, Interaction::Pressed) => Some(true),
        (true, Interaction::Hovered | Interaction::None) => Some(false),
        _ => None,
    }
}

fn label(direction: MoveDirection) -> &'static str {
    match direction {
        MoveDirection::Forward => "^",
        MoveDirection::Backward => "v",
        MoveDirection::Left => "<",
        MoveDirection::Right => ">",
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, direction: MoveDirection) {
    parent
        .spawn((
            DirectionalButton {
                direction,
                held: false,
            },
            Button,
            Name::new(direction.element_id()),
            BackgroundColor(IDLE_COLOR),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width: Val::Px(BUTTON_SIZE),
                height: Val::Px(BUTTON_SIZE),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label(direction)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });
}

fn spawn_row(parent: &mut ChildSpawnerCommands, directions: &[MoveDirection]) {
    parent
        .spawn(Node {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(6.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|row| {
            for &direction in directions {
                spawn_button(row, direction);
            }
        });
}

/// Arrow-key pad anchored to the bottom centre of the window.
pub fn spawn_directional_pad(mut commands: Commands) {
    commands
        .spawn((
            DirectionalPadRoot,
            Name::new("DirectionalPad"),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-(BUTTON_SIZE * 1.5 + 6.0))),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|pad| {
            spawn_row(pad, &[MoveDirection::Forward]);
            spawn_row(
                pad,
                &[
                    MoveDirection::Left,
                    MoveDirection::Backward,
                    MoveDirection::Right,
                ],
            );
        });
}

/// Pointer source for the directional flags.
pub fn handle_directional_buttons(
    mut buttons: Query<
        (&Interaction, &mut DirectionalButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut flags: ResMut<InputFlags>,
) {
    for (interaction, mut button, mut color) in &mut buttons {
        let Some(held) = pointer_transition(button.held, *interaction) else {
            continue;
        };
        button.held = held;
        flags.set(button.direction, held);
        *color = BackgroundColor(if held { HELD_COLOR } else { IDLE_COLOR });
    }
}

pub fn track_pad_hover(
    buttons: Query<&Interaction, With<DirectionalButton>>,
    mut capture: ResMut<PointerCapture>,
) {
    capture.over_buttons = buttons
        .iter()
        .any(|interaction| *interaction != Interaction::None);
}
