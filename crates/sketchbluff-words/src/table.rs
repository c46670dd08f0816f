//! The compiled-in dictionary.
//!
//! Targets are things a player can reasonably draw in under a minute;
//! decoys get progressively closer to the target as the tier hardens.

use sketchbluff_protocol::{Language, WordCategory};

use crate::WordEntry;

macro_rules! entry {
    ($target:expr, $easy:expr, $medium:expr, $hard:expr, $cat:ident, $lang:ident) => {
        WordEntry {
            target: $target,
            easy: $easy,
            medium: $medium,
            hard: $hard,
            category: WordCategory::$cat,
            language: Language::$lang,
        }
    };
}

pub static WORD_TABLE: &[WordEntry] = &[
    // Animals — English
    entry!("ELEPHANT", ["HIPPO", "RHINO"], ["MAMMOTH", "WALRUS"], ["MANATEE", "TAPIR"], Animals, English),
    entry!("GIRAFFE", ["ZEBRA", "HORSE"], ["OKAPI", "LLAMA"], ["ALPACA", "CAMEL"], Animals, English),
    entry!("PENGUIN", ["DUCK", "SWAN"], ["PUFFIN", "SEAGULL"], ["ALBATROSS", "PELICAN"], Animals, English),
    entry!("BUTTERFLY", ["MOTH", "BEE"], ["DRAGONFLY", "LADYBUG"], ["FIREFLY", "CRICKET"], Animals, English),
    entry!("OCTOPUS", ["SQUID", "JELLYFISH"], ["CUTTLEFISH", "STARFISH"], ["NAUTILUS", "ANEMONE"], Animals, English),
    entry!("KANGAROO", ["RABBIT", "DEER"], ["WALLABY", "KOALA"], ["WOMBAT", "QUOKKA"], Animals, English),
    entry!("TIGER", ["LION", "LEOPARD"], ["CHEETAH", "JAGUAR"], ["LYNX", "OCELOT"], Animals, English),
    entry!("DOLPHIN", ["WHALE", "SHARK"], ["PORPOISE", "ORCA"], ["NARWHAL", "BELUGA"], Animals, English),
    // Food — English
    entry!("PIZZA", ["BURGER", "SANDWICH"], ["CALZONE", "FLATBREAD"], ["FOCACCIA", "PANINI"], Food, English),
    entry!("SUSHI", ["RICE", "FISH"], ["SASHIMI", "MAKI"], ["NIGIRI", "TEMPURA"], Food, English),
    entry!("CUPCAKE", ["CAKE", "MUFFIN"], ["BROWNIE", "COOKIE"], ["MACARON", "ECLAIR"], Food, English),
    entry!("TACO", ["BURRITO", "WRAP"], ["QUESADILLA", "ENCHILADA"], ["CHALUPA", "GORDITA"], Food, English),
    entry!("ICE CREAM", ["YOGURT", "PUDDING"], ["GELATO", "SORBET"], ["SEMIFREDDO", "GRANITA"], Food, English),
    entry!("APPLE", ["ORANGE", "BANANA"], ["PEAR", "PEACH"], ["QUINCE", "PERSIMMON"], Food, English),
    // Objects — English
    entry!("UMBRELLA", ["RAINCOAT", "HAT"], ["PARASOL", "CANOPY"], ["AWNING", "GAZEBO"], Objects, English),
    entry!("TELESCOPE", ["BINOCULARS", "CAMERA"], ["MICROSCOPE", "PERISCOPE"], ["SEXTANT", "THEODOLITE"], Objects, English),
    entry!("GUITAR", ["PIANO", "DRUMS"], ["BANJO", "UKULELE"], ["MANDOLIN", "LUTE"], Objects, English),
    entry!("BACKPACK", ["BAG", "SUITCASE"], ["RUCKSACK", "DUFFEL"], ["HAVERSACK", "KNAPSACK"], Objects, English),
    entry!("CLOCK", ["WATCH", "TIMER"], ["SUNDIAL", "HOURGLASS"], ["CHRONOMETER", "METRONOME"], Objects, English),
    entry!("LAMP", ["CANDLE", "TORCH"], ["LANTERN", "CHANDELIER"], ["SCONCE", "BRAZIER"], Objects, English),
    // Actions — English
    entry!("DANCING", ["JUMPING", "RUNNING"], ["SPINNING", "TWIRLING"], ["PIROUETTING", "WALTZING"], Actions, English),
    entry!("SWIMMING", ["DIVING", "FLOATING"], ["SURFING", "KAYAKING"], ["SNORKELING", "PADDLING"], Actions, English),
    entry!("SLEEPING", ["RESTING", "LYING"], ["NAPPING", "DOZING"], ["SNOOZING", "SLUMBERING"], Actions, English),
    entry!("COOKING", ["EATING", "BAKING"], ["GRILLING", "FRYING"], ["SAUTEING", "BRAISING"], Actions, English),
    entry!("PAINTING", ["DRAWING", "WRITING"], ["SKETCHING", "COLORING"], ["ILLUSTRATING", "RENDERING"], Actions, English),
    // Places — English
    entry!("MOUNTAIN", ["HILL", "VALLEY"], ["PEAK", "SUMMIT"], ["RIDGE", "PLATEAU"], Places, English),
    entry!("BEACH", ["OCEAN", "LAKE"], ["SHORE", "COAST"], ["HARBOR", "LAGOON"], Places, English),
    entry!("CASTLE", ["HOUSE", "TOWER"], ["FORTRESS", "PALACE"], ["CITADEL", "STRONGHOLD"], Places, English),
    entry!("FOREST", ["TREES", "WOODS"], ["JUNGLE", "GROVE"], ["THICKET", "WOODLAND"], Places, English),
    entry!("DESERT", ["SAND", "DUNE"], ["OASIS", "WASTELAND"], ["SAVANNA", "STEPPE"], Places, English),
    // Abstract — English
    entry!("HAPPINESS", ["JOY", "FUN"], ["DELIGHT", "PLEASURE"], ["EUPHORIA", "BLISS"], Abstract, English),
    entry!("FEAR", ["SCARY", "WORRY"], ["ANXIETY", "DREAD"], ["TERROR", "PANIC"], Abstract, English),
    entry!("LOVE", ["LIKE", "CARE"], ["AFFECTION", "PASSION"], ["ADORATION", "DEVOTION"], Abstract, English),
    entry!("TIME", ["CLOCK", "HOUR"], ["MOMENT", "PERIOD"], ["DURATION", "EPOCH"], Abstract, English),
    entry!("FREEDOM", ["FREE", "LIBERTY"], ["INDEPENDENCE", "RELEASE"], ["AUTONOMY", "EMANCIPATION"], Abstract, English),
    // Animals — Swedish
    entry!("ELEFANT", ["FLODHÄST", "NOSHÖRNING"], ["MAMMUT", "VALROSS"], ["MANATE", "TAPIR"], Animals, Swedish),
    entry!("GIRAFF", ["ZEBRA", "HÄST"], ["OKAPI", "LAMA"], ["ALPACKA", "KAMEL"], Animals, Swedish),
    entry!("PINGVIN", ["ANKA", "SVAN"], ["LUNNEFÅGEL", "MÅS"], ["ALBATROSS", "PELIKAN"], Animals, Swedish),
    entry!("FJÄRIL", ["MAL", "BI"], ["TROLLSLÄNDA", "NYCKELPIGA"], ["LYSMASK", "SYRSA"], Animals, Swedish),
    entry!("BLÄCKFISK", ["TIOARMAD BLÄCKFISK", "MANET"], ["SEPIA", "SJÖSTJÄRNA"], ["NAUTILUS", "HAVSANEMONE"], Animals, Swedish),
    // Food — Swedish
    entry!("PIZZA", ["HAMBURGARE", "SMÖRGÅS"], ["CALZONE", "FLATBRÖD"], ["FOCACCIA", "PANINI"], Food, Swedish),
    entry!("SUSHI", ["RIS", "FISK"], ["SASHIMI", "MAKI"], ["NIGIRI", "TEMPURA"], Food, Swedish),
    entry!("MUFFINS", ["TÅRTA", "BULLE"], ["BROWNIE", "KAKA"], ["MACARON", "ECLAIR"], Food, Swedish),
    entry!("TACO", ["BURRITO", "WRAP"], ["QUESADILLA", "ENCHILADA"], ["CHALUPA", "GORDITA"], Food, Swedish),
    entry!("GLASS", ["YOGHURT", "PUDDING"], ["GELATO", "SORBET"], ["SEMIFREDDO", "GRANITA"], Food, Swedish),
    // Objects — Swedish
    entry!("PARAPLY", ["REGNROCK", "HATT"], ["PARASOLL", "BALDAKIN"], ["MARKIS", "PAVILJONG"], Objects, Swedish),
    entry!("TELESKOP", ["KIKARE", "KAMERA"], ["MIKROSKOP", "PERISKOP"], ["SEXTANT", "TEODOLIT"], Objects, Swedish),
    entry!("GITARR", ["PIANO", "TRUMMOR"], ["BANJO", "UKULELE"], ["MANDOLIN", "LUTA"], Objects, Swedish),
    entry!("RYGGSÄCK", ["VÄSKA", "RESVÄSKA"], ["RANSEL", "SPORTBAG"], ["TORNYSTER", "KNAPSÄCK"], Objects, Swedish),
    // Actions — Swedish
    entry!("DANS", ["HOPP", "SPRING"], ["SNURR", "VIRVLA"], ["PIRUETT", "VALS"], Actions, Swedish),
    entry!("SIMMA", ["DYKA", "FLYTA"], ["SURFA", "PADDLA"], ["SNORKLA", "RO"], Actions, Swedish),
    entry!("SOVA", ["VILA", "LIGGA"], ["TUPPLUR", "DÅSA"], ["SLUMRA", "DVALA"], Actions, Swedish),
    entry!("LAGA MAT", ["ÄTA", "BAKA"], ["GRILLA", "STEKA"], ["SAUTERA", "BRYSERA"], Actions, Swedish),
    // Places — Swedish
    entry!("BERG", ["KULLE", "DAL"], ["TOPP", "KRÖN"], ["ÅS", "PLATÅ"], Places, Swedish),
    entry!("STRAND", ["HAV", "SJÖ"], ["KUST", "KUSTLINJE"], ["HAMN", "LAGUN"], Places, Swedish),
    entry!("SLOTT", ["HUS", "TORN"], ["FÄSTNING", "PALATS"], ["CITADELL", "BORG"], Places, Swedish),
    // Abstract — Swedish
    entry!("LYCKA", ["GLÄDJE", "NÖJE"], ["FRÖJD", "VÄLBEHAG"], ["EUFORI", "SALIGHET"], Abstract, Swedish),
    entry!("RÄDSLA", ["SKRÄCK", "ORO"], ["ÅNGEST", "FASA"], ["TERROR", "PANIK"], Abstract, Swedish),
    entry!("KÄRLEK", ["GILLA", "OMSORG"], ["TILLGIVENHET", "PASSION"], ["BEUNDRAN", "HÄNGIVENHET"], Abstract, Swedish),
    entry!("TID", ["KLOCKA", "TIMME"], ["ÖGONBLICK", "PERIOD"], ["VARAKTIGHET", "EPOK"], Abstract, Swedish),
    entry!("FRIHET", ["FRI", "BEFRIELSE"], ["SJÄLVSTÄNDIGHET", "FRIGÖRELSE"], ["AUTONOMI", "EMANCIPATION"], Abstract, Swedish),
];
