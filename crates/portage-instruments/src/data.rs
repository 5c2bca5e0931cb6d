use portage_core::models::DevelopmentalArea::{self, *};

use crate::catalog::Question;

const ITEMS: &[(&str, DevelopmentalArea, &str, &str)] = &[
    // Infant stimulation
    ("E1", InfantStimulation, "0-1", "Follows with the eyes an object moved across the visual field"),
    ("E2", InfantStimulation, "0-1", "Reacts to a sound by turning the head toward it"),
    ("E3", InfantStimulation, "0-1", "Lifts the head while lying face down"),
    ("E4", InfantStimulation, "0-1", "Grasps an object placed in the hand"),
    ("E5", InfantStimulation, "0-1", "Quiets when picked up or spoken to"),
    ("E6", InfantStimulation, "0-1", "Looks at own hands"),
    // Socialization
    ("S1", Socialization, "0-1", "Smiles in response to the attention of an adult"),
    ("S2", Socialization, "0-1", "Looks at the face of the person who is speaking"),
    ("S3", Socialization, "0-1", "Waves bye-bye in imitation of an adult"),
    ("S4", Socialization, "1-2", "Plays alongside another child, each doing separate activities"),
    ("S5", Socialization, "1-2", "Hands a book to an adult to have it read"),
    ("S6", Socialization, "2-3", "Takes part in a song or game with an adult"),
    ("S7", Socialization, "2-3", "Greets familiar adults without being reminded"),
    ("S8", Socialization, "3-4", "Takes turns in a group game with help"),
    ("S9", Socialization, "4-5", "Asks permission to use objects belonging to others"),
    ("S10", Socialization, "5-6", "Explains the rules of a game to other children"),
    // Language
    ("L1", Language, "0-1", "Repeats sounds made by others"),
    ("L2", Language, "0-1", "Responds to own name by looking"),
    ("L3", Language, "1-2", "Says five different words"),
    ("L4", Language, "1-2", "Points to three body parts when asked"),
    ("L5", Language, "2-3", "Combines two words to express possession"),
    ("L6", Language, "2-3", "Answers simple 'what' questions"),
    ("L7", Language, "3-4", "Tells how common objects are used"),
    ("L8", Language, "3-4", "Uses plurals ending in s"),
    ("L9", Language, "4-5", "Tells a familiar story without pictures"),
    ("L10", Language, "5-6", "Describes the location of an object using 'beside', 'behind'"),
    // Self-help
    ("A1", SelfHelp, "0-1", "Sucks and swallows liquids"),
    ("A2", SelfHelp, "0-1", "Eats semi-solid food offered with a spoon"),
    ("A3", SelfHelp, "1-2", "Drinks from a cup held with both hands"),
    ("A4", SelfHelp, "1-2", "Feeds self with a spoon"),
    ("A5", SelfHelp, "2-3", "Removes socks and shoes"),
    ("A6", SelfHelp, "2-3", "Washes and dries hands with help"),
    ("A7", SelfHelp, "3-4", "Puts on coat without help"),
    ("A8", SelfHelp, "4-5", "Brushes teeth without help"),
    ("A9", SelfHelp, "5-6", "Ties shoelaces"),
    // Cognition
    ("C1", Cognition, "0-1", "Removes an object from an open container"),
    ("C2", Cognition, "0-1", "Finds an object hidden under a cloth"),
    ("C3", Cognition, "1-2", "Places three shapes in a shape board"),
    ("C4", Cognition, "1-2", "Matches objects of the same colour"),
    ("C5", Cognition, "2-3", "Names pictures of common objects"),
    ("C6", Cognition, "2-3", "Points to big and little on request"),
    ("C7", Cognition, "3-4", "Counts to three in imitation"),
    ("C8", Cognition, "3-4", "Draws a square in imitation"),
    ("C9", Cognition, "4-5", "Names eight colours"),
    ("C10", Cognition, "5-6", "Tells the days of the week in order"),
    // Motor
    ("M1", Motor, "0-1", "Reaches for an object in front of the body"),
    ("M2", Motor, "0-1", "Sits without support"),
    ("M3", Motor, "0-1", "Crawls forward on hands and knees"),
    ("M4", Motor, "1-2", "Walks without help"),
    ("M5", Motor, "1-2", "Builds a tower of three blocks"),
    ("M6", Motor, "2-3", "Jumps in place with both feet"),
    ("M7", Motor, "2-3", "Turns pages of a book one at a time"),
    ("M8", Motor, "3-4", "Cuts with scissors"),
    ("M9", Motor, "4-5", "Hops on one foot"),
    ("M10", Motor, "5-6", "Rides a bicycle with training wheels"),
];

pub(crate) fn portage_questions() -> Vec<Question> {
    ITEMS
        .iter()
        .map(|(id, area, age, description)| Question::new(id, *area, age, description))
        .collect()
}
