//! Provider reference tables for event types and qualifiers.
//!
//! Static mappings from the provider's integer codes to semantic names and
//! descriptions, as published in the Opta event definitions. Lookups never
//! fail: codes added by the provider after this table was authored resolve
//! to a deterministic placeholder embedding the code, so ingestion is never
//! blocked by an unrecognized code. The tables are immutable and safe for
//! concurrent reads.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Reference entry for one qualifier code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifierInfo {
    /// Semantic name, e.g. "Long ball"
    pub name: &'static str,
    /// Declared value encoding, e.g. "Boolean", "Player ID", "0-100"
    pub value_kind: &'static str,
    /// Short description of what the qualifier records
    pub description: &'static str,
}

const fn qual(
    name: &'static str,
    value_kind: &'static str,
    description: &'static str,
) -> QualifierInfo {
    QualifierInfo {
        name,
        value_kind,
        description,
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Event type codes as (id, name, description). Gaps in the id sequence are
/// the provider's, not omissions.
const EVENT_TYPES: &[(i32, &str, &str)] = &[
    (1, "Pass", "Any pass attempted from one player to another"),
    (2, "Offside Pass", "Attempted pass to player in offside position"),
    (3, "Take On", "Attempted dribble past opponent"),
    (4, "Foul", "Foul committed resulting in free kick"),
    (5, "Out", "Ball goes out for throw-in or goal kick"),
    (6, "Corner Awarded", "Ball goes out for corner kick"),
    (7, "Tackle", "Dispossess opponent of ball"),
    (8, "Interception", "Intercept pass between opposition"),
    (9, "Turnover", "Unforced error/loss of possession (NO LONGER USED)"),
    (10, "Save", "Goalkeeper saves shot"),
    (11, "Claim", "Goalkeeper catches crossed ball"),
    (12, "Clearance", "Clear ball from defensive zone"),
    (13, "Miss", "Shot wide or over goal"),
    (14, "Post", "Ball hits frame of goal"),
    (15, "Attempt Saved", "Shot saved"),
    (16, "Goal", "Goal scored"),
    (17, "Card", "Yellow or red card shown"),
    (18, "Player off", "Substitution off"),
    (19, "Player on", "Substitution on"),
    (20, "Player retired", "Player forced to leave pitch"),
    (21, "Player returns", "Player returns after injury"),
    (22, "Player becomes goalkeeper", "Outfield player replaces GK"),
    (23, "Goalkeeper becomes player", "GK becomes outfield player"),
    (24, "Condition change", "Change in playing conditions"),
    (25, "Official change", "Referee or linesman replaced"),
    (27, "Start delay", "Stoppage in play"),
    (28, "End delay", "Stoppage ends, play resumes"),
    (30, "End", "End of match period"),
    (32, "Start", "Start of match period"),
    (34, "Team set up", "Team lineup; qualifiers show formation"),
    (35, "Player changed position", "Player moved to different position"),
    (36, "Player changed Jersey number", "Player forced to change shirt"),
    (37, "Collection End", "End of match data collection"),
    (38, "Temp_Goal", "Goal pending additional qualifiers"),
    (39, "Temp_Attempt", "Shot pending additional qualifiers"),
    (40, "Formation change", "Team alters formation"),
    (41, "Punch", "Goalkeeper punches ball clear"),
    (42, "Good Skill", "Good skill shown (NO LONGER USED)"),
    (43, "Deleted event", "Event deleted"),
    (44, "Aerial", "Aerial duel (50/50)"),
    (45, "Challenge", "Player fails to win ball in dribble"),
    (47, "Rescinded card", "Card rescinded post-match"),
    (49, "Ball recovery", "Team wins possession"),
    (50, "Dispossessed", "Player loses possession"),
    (51, "Error", "Player mistake losing ball"),
    (52, "Keeper pick-up", "Goalkeeper picks up ball"),
    (53, "Cross not claimed", "GK fails to catch cross"),
    (54, "Smother", "GK covers ball in box"),
    (55, "Offside provoked", "Defender triggers offside"),
    (56, "Shield ball opp", "Defender shields ball from opponent"),
    (57, "Foul throw-in", "Throw-in taken incorrectly"),
    (58, "Penalty faced", "GK faces penalty"),
    (59, "Keeper Sweeper", "Keeper off line to clear ball"),
    (60, "Chance missed", "Player in good position doesn't receive pass"),
    (61, "Ball touch", "Bad touch losing possession"),
    (63, "Temp_Save", "Save without full details"),
    (64, "Resume", "Match resumes after abandonment"),
    (65, "Contentious referee decision", "Major talking point by ref"),
    (66, "Possession Data", "Possession event every 5 mins"),
    (67, "50/50", "Duel for loose ball (GERMAN ONLY)"),
    (68, "Referee Drop Ball", "Ref stops, drops ball"),
    (69, "Failed to Block", "Attempt to block lost"),
    (70, "Injury Time Announcement", "Injury time awarded"),
    (71, "Coach Setup", "Coach type event"),
    (72, "Caught Offside", "Player in offside position"),
    (73, "Other Ball Contact", "Automated DFL event"),
    (74, "Blocked Pass", "Defender blocks pass"),
];

static EVENT_TYPE_INDEX: Lazy<HashMap<i32, (&'static str, &'static str)>> = Lazy::new(|| {
    EVENT_TYPES
        .iter()
        .map(|&(id, name, description)| (id, (name, description)))
        .collect()
});

// =============================================================================
// Qualifiers
// =============================================================================

/// Qualifier codes as (id, reference entry).
const QUALIFIERS: &[(i32, QualifierInfo)] = &[
    (1, qual("Long ball", "Boolean", "Pass over 35 yards")),
    (2, qual("Cross", "Boolean", "Ball from wide areas into box")),
    (3, qual("Head pass", "Boolean", "Pass made with head")),
    (4, qual("Through ball", "Boolean", "Ball for attacking run")),
    (5, qual("Free kick taken", "Boolean", "Free kick taken")),
    (6, qual("Corner taken", "Boolean", "Corner kick taken")),
    (7, qual("Players caught offside", "Player ID", "Player in offside")),
    (8, qual("Goal disallowed", "Boolean", "Pass led to disallowed goal")),
    (9, qual("Penalty", "Boolean", "Penalty kick")),
    (15, qual("Head", "Boolean", "Action with head")),
    (20, qual("Right footed", "Boolean", "Shot with right foot")),
    (21, qual("Other body part", "Boolean", "Shot with other body part")),
    (28, qual("Own goal", "Boolean", "Own goal")),
    (29, qual("Assisted", "Boolean", "Shot had assist")),
    (30, qual("Involved", "Player IDs", "Players in lineup")),
    (31, qual("Yellow card", "Boolean", "Yellow card shown")),
    (32, qual("Second yellow", "Boolean", "Second yellow card")),
    (33, qual("Red card", "Boolean", "Red card shown")),
    (34, qual("Referee abuse", "Boolean", "Card for abuse to ref")),
    (35, qual("Argument", "Boolean", "Card for argument")),
    (36, qual("Fight", "Boolean", "Card for fight")),
    (37, qual("Time wasting", "Boolean", "Card for time wasting")),
    (38, qual("Excessive celebration", "Boolean", "Card for celebration")),
    (39, qual("Crowd interaction", "Boolean", "Card for crowd contact")),
    (40, qual("Other reason", "Boolean", "Card for unknown reason")),
    (41, qual("Injury", "Boolean", "Substitution for injury")),
    (42, qual("Tactical", "Boolean", "Substitution for tactics")),
    (44, qual("Player position", "Text", "GK/DEF/MID/FWD/SUB")),
    (50, qual("Official position", "1-4", "Referee/Linesman positions")),
    (51, qual("Official ID", "ID", "Unique official ID")),
    (53, qual("Injured player ID", "Player ID", "Injured player")),
    (54, qual("End cause", "1-100", "Reason for match end")),
    (56, qual("Zone", "Text", "Back/Left/Centre/Right")),
    (57, qual("End type", "Type", "End of match period")),
    (59, qual("Jersey number", "Integer", "Shirt number")),
    (72, qual("Left footed", "Boolean", "Shot with left foot")),
    (88, qual("High claim", "Boolean", "GK high claim")),
    (89, qual("1 on 1", "Boolean", "Attacker 1-on-1 with GK")),
    (90, qual("Deflected save", "Boolean", "GK deflected save")),
    (91, qual("Dive and deflect", "Boolean", "GK dive and deflect")),
    (92, qual("Catch", "Boolean", "GK catches")),
    (93, qual("Dive and catch", "Boolean", "GK dive and catch")),
    (95, qual("Back pass", "Boolean", "Illegal GK back pass")),
    (106, qual("Attacking pass", "Boolean", "Pass in opposition half")),
    (107, qual("Throw-in", "Boolean", "Throw-in taken")),
    (108, qual("Volley", "Boolean", "Shot on volley")),
    (109, qual("Overhead", "Boolean", "Overhead kick")),
    (113, qual("Strong", "Boolean", "Strong shot")),
    (114, qual("Weak", "Boolean", "Weak shot")),
    (115, qual("Rising", "Boolean", "Rising shot")),
    (116, qual("Dipping", "Boolean", "Dipping shot")),
    (117, qual("Lob", "Boolean", "Lob attempt")),
    (120, qual("Swerve left", "Boolean", "Swerve left")),
    (121, qual("Swerve right", "Boolean", "Swerve right")),
    (122, qual("Swerve moving", "Boolean", "Multiple swerves")),
    (123, qual("Keeper throw", "Boolean", "GK throws")),
    (124, qual("Goal kick", "Boolean", "Goal kick taken")),
    (128, qual("Punch", "Boolean", "GK punches")),
    (130, qual("Team formation", "Formation ID", "Team formation")),
    (131, qual("Team player formation", "1-11", "Player formation slot")),
    (132, qual("Dive", "Boolean", "Simulation/dive")),
    (133, qual("Deflection", "Boolean", "Shot deflection")),
    (136, qual("Keeper touched", "Boolean", "GK touched goal")),
    (137, qual("Keeper saved", "Boolean", "GK saved wide shot")),
    (138, qual("Hit woodwork", "Boolean", "Hit post/bar")),
    (139, qual("Own player", "Boolean", "Shot saved by defender")),
    (140, qual("Pass End X", "0-100", "X coordinate of pass end")),
    (141, qual("Pass End Y", "0-100", "Y coordinate of pass end")),
    (144, qual("Deleted event type", "Event ID", "Event to remove")),
    (152, qual("Direct", "Boolean", "Direct free kick")),
    (153, qual("Not past goal line", "Boolean", "Shot missed")),
    (154, qual("Intentional assist", "Boolean", "Intentional assist")),
    (155, qual("Chipped", "Boolean", "Chipped pass")),
    (156, qual("Lay-off", "Boolean", "Lay-off pass")),
    (157, qual("Launch", "Boolean", "Launch pass")),
    (158, qual("Persistent infringement", "Boolean", "Persistent foul")),
    (159, qual("Foul language", "Boolean", "Foul language")),
    (160, qual("Throw-in set piece", "Boolean", "Throw-in set piece")),
    (161, qual("Encroachment", "Boolean", "Encroachment")),
    (162, qual("Leaving field", "Boolean", "Leaving field")),
    (163, qual("Entering field", "Boolean", "Entering field")),
    (164, qual("Spitting", "Boolean", "Spitting")),
    (165, qual("Professional foul", "Boolean", "Professional foul")),
    (166, qual("Handling on line", "Boolean", "Handball block")),
    (168, qual("Flick-on", "Boolean", "Flick-on pass")),
    (171, qual("Rescinded card", "Boolean", "Card rescinded")),
    (172, qual("No impact on timing", "Boolean", "Booked off bench")),
    (173, qual("Parried safe", "Boolean", "GK parries safe")),
    (174, qual("Parried danger", "Boolean", "GK parries to danger")),
    (175, qual("Fingertip", "Boolean", "GK fingertip save")),
    (176, qual("Caught", "Boolean", "GK catches")),
    (177, qual("Collected", "Boolean", "GK collects")),
    (178, qual("Standing", "Boolean", "GK standing save")),
    (179, qual("Diving", "Boolean", "GK diving save")),
    (180, qual("Stooping", "Boolean", "GK stooping save")),
    (181, qual("Reaching", "Boolean", "GK reaching save")),
    (182, qual("Hands", "Boolean", "GK saves with hands")),
    (183, qual("Feet", "Boolean", "GK saves with feet")),
    (184, qual("Dissent", "Boolean", "Card for dissent")),
    (186, qual("Scored", "Stat", "Shot not saved = goal")),
    (187, qual("Saved", "Stat", "Shot saved")),
    (188, qual("Missed", "Stat", "Shot missed")),
    (189, qual("Player not visible", "Boolean", "Replay shown")),
    (191, qual("Off ball foul", "Boolean", "Off-ball foul")),
    (192, qual("Block by hand", "Boolean", "Block by hand")),
    (194, qual("Captain", "Player ID", "Team captain ID")),
    (195, qual("Pull back", "Boolean", "Pull back pass")),
    (196, qual("Switch of play", "Boolean", "Switch of play")),
    (197, qual("Team kit", "Kit ID", "Team kit ID")),
    (198, qual("GK hoof", "Boolean", "GK kicks long")),
    (199, qual("GK kick from hands", "Boolean", "GK kicks from hands")),
    (200, qual("Referee stop", "Boolean", "Referee stops")),
    (201, qual("Referee delay", "Boolean", "Referee delay")),
    (202, qual("Weather problem", "Boolean", "Weather stoppage")),
    (203, qual("Crowd trouble", "Boolean", "Crowd trouble")),
    (204, qual("Fire", "Boolean", "Fire in stadium")),
    (205, qual("Object thrown", "Boolean", "Object from crowd")),
    (206, qual("Spectator on pitch", "Boolean", "Spectator on pitch")),
    (207, qual("Awaiting decision", "Boolean", "Awaiting decision")),
    (208, qual("Referee injury", "Boolean", "Referee injury")),
    (209, qual("Game end", "Boolean", "Game finished")),
    (210, qual("Assist", "Boolean", "Pass is assist")),
    (212, qual("Length", "Yards", "Pass distance in yards")),
    (213, qual("Angle", "Radians", "Ball angle (0-6.28)")),
    (214, qual("Big chance", "Boolean", "Big chance")),
    (215, qual("Individual play", "Boolean", "Individual play")),
    (217, qual("2nd assisted", "Boolean", "2nd assist")),
    (218, qual("2nd assist", "Boolean", "Pass created assist")),
    (219, qual("Players on both posts", "Boolean", "Both posts covered")),
    (220, qual("Player on near post", "Boolean", "Near post covered")),
    (221, qual("Player on far post", "Boolean", "Far post covered")),
    (222, qual("No players on posts", "Boolean", "Posts uncovered")),
    (223, qual("In-swinger", "Boolean", "Corner in-swinger")),
    (224, qual("Out-swinger", "Boolean", "Corner out-swinger")),
    (225, qual("Straight", "Boolean", "Corner straight")),
    (226, qual("Suspended", "Boolean", "Game suspended")),
    (227, qual("Resume", "Boolean", "Game resumed")),
    (228, qual("Own shot blocked", "Boolean", "Own shot blocked")),
    (230, qual("GK X coordinate", "Coordinate", "GK position X")),
    (231, qual("GK Y coordinate", "Coordinate", "GK position Y")),
    (236, qual("Blocked pass", "Boolean", "Blocked pass")),
    (237, qual("Low", "Boolean", "Low goal kick")),
    (238, qual("Fair play", "Boolean", "Fair play kick")),
    (240, qual("GK start", "Boolean", "GK passes from hands")),
    (241, qual("Indirect", "Boolean", "Indirect free kick")),
    (242, qual("Obstruction", "Boolean", "Obstruction foul")),
    (243, qual("Unsporting behavior", "Boolean", "Unsporting")),
    (244, qual("Not retreating", "Boolean", "Not retreating")),
    (245, qual("Serious foul", "Boolean", "Serious foul")),
    (246, qual("Drinks break", "Boolean", "Drinks break")),
    (254, qual("Follows dribble", "Boolean", "Follows dribble")),
    (255, qual("Open roof", "Boolean", "Roof open")),
    (256, qual("Air humidity", "Percent", "Humidity %")),
    (257, qual("Air pressure", "Value", "Air pressure")),
    (258, qual("Sold out", "Boolean", "Stadium sold out")),
    (259, qual("Celsius degrees", "Temperature", "Temperature C")),
    (260, qual("Floodlight", "Boolean", "Floodlit")),
    (261, qual("1 on 1 chip", "Boolean", "1v1 chip goal")),
    (262, qual("Back heel", "Boolean", "Back heel goal")),
    (263, qual("Direct corner", "Boolean", "Direct corner goal")),
    (264, qual("Aerial foul", "Boolean", "Aerial foul")),
    (265, qual("Attempted tackle", "Boolean", "Tackle attempt")),
    (266, qual("Put through", "Boolean", "Put through")),
    (267, qual("Right arm save", "Boolean", "Saved with right arm")),
    (268, qual("Left arm save", "Boolean", "Saved with left arm")),
    (269, qual("Both arms save", "Boolean", "Saved with both arms")),
    (270, qual("Right leg save", "Boolean", "Saved with right leg")),
    (271, qual("Left leg save", "Boolean", "Saved with left leg")),
    (272, qual("Both legs save", "Boolean", "Saved with both legs")),
    (273, qual("Hit right post", "Boolean", "Hit right post")),
    (274, qual("Hit left post", "Boolean", "Hit left post")),
    (275, qual("Hit bar", "Boolean", "Hit crossbar")),
    (278, qual("Tap", "Boolean", "Free kick rolled")),
    (279, qual("Kick off", "Boolean", "Starting pass")),
    (280, qual("Fantasy assist type", "Event ID", "Assist event")),
    (281, qual("Fantasy assisted by", "Text", "Player assist")),
    (282, qual("Fantasy assist team", "Text", "Team assist")),
    (283, qual("Coach ID", "Coach ID", "Team coach ID")),
    (284, qual("Duel", "Boolean", "Blocked shot duel")),
    (287, qual("Over-arm", "Boolean", "Over-arm throw")),
    (289, qual("Denied goal-scoring opp", "Boolean", "Denied scoring")),
    (290, qual("Coach types", "Types", "Coach roles")),
];

static QUALIFIER_INDEX: Lazy<HashMap<i32, QualifierInfo>> =
    Lazy::new(|| QUALIFIERS.iter().copied().collect());

// =============================================================================
// Lookup Functions
// =============================================================================

/// Resolve an event type code to its semantic name.
pub fn event_type_name(type_id: i32) -> String {
    EVENT_TYPE_INDEX
        .get(&type_id)
        .map(|(name, _)| (*name).to_string())
        .unwrap_or_else(|| format!("Unknown (ID: {type_id})"))
}

/// Resolve an event type code to its description.
pub fn event_type_description(type_id: i32) -> String {
    EVENT_TYPE_INDEX
        .get(&type_id)
        .map(|(_, description)| (*description).to_string())
        .unwrap_or_else(|| "No description".to_string())
}

/// Resolve a qualifier code to its semantic name.
pub fn qualifier_name(qualifier_id: i32) -> String {
    QUALIFIER_INDEX
        .get(&qualifier_id)
        .map(|info| info.name.to_string())
        .unwrap_or_else(|| format!("Unknown (ID: {qualifier_id})"))
}

/// Resolve a qualifier code to its description.
pub fn qualifier_description(qualifier_id: i32) -> String {
    QUALIFIER_INDEX
        .get(&qualifier_id)
        .map(|info| info.description.to_string())
        .unwrap_or_else(|| "No description".to_string())
}

/// Declared value encoding for a qualifier code, if the code is known.
pub fn qualifier_value_kind(qualifier_id: i32) -> Option<&'static str> {
    QUALIFIER_INDEX
        .get(&qualifier_id)
        .map(|info| info.value_kind)
}

/// Full reference entry for a qualifier code, if the code is known.
pub fn qualifier_info(qualifier_id: i32) -> Option<&'static QualifierInfo> {
    QUALIFIER_INDEX.get(&qualifier_id)
}
