use std::ops::{Index, IndexMut};

/// Body landmark tracked for each player.
///
/// The discriminants are the joint's index in a [`PerJoint`] array and match the order used by
/// the exported database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Joint {
    LeftToe,
    RightToe,
    LeftHeel,
    RightHeel,
    LeftAnkle,
    RightAnkle,
    LeftKnee,
    RightKnee,
    LeftHip,
    RightHip,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHand,
    RightHand,
    LeftFingers,
    RightFingers,
    Core,
    Neck,
    Head,
}

pub const JOINT_COUNT: usize = 23;

/// Left/right counterparts exchanged when a pose is mirrored.
pub const MIRRORED_PAIRS: [(Joint, Joint); 10] = [
    (Joint::LeftShoulder, Joint::RightShoulder),
    (Joint::LeftElbow, Joint::RightElbow),
    (Joint::LeftHand, Joint::RightHand),
    (Joint::LeftFingers, Joint::RightFingers),
    (Joint::LeftWrist, Joint::RightWrist),
    (Joint::LeftAnkle, Joint::RightAnkle),
    (Joint::LeftToe, Joint::RightToe),
    (Joint::LeftHip, Joint::RightHip),
    (Joint::LeftHeel, Joint::RightHeel),
    (Joint::LeftKnee, Joint::RightKnee),
];

impl Joint {
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::LeftToe,
        Joint::RightToe,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHand,
        Joint::RightHand,
        Joint::LeftFingers,
        Joint::RightFingers,
        Joint::Core,
        Joint::Neck,
        Joint::Head,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The joint on the other side of the body. Central joints map to themselves.
    pub fn mirror(self) -> Joint {
        for (left, right) in MIRRORED_PAIRS {
            if self == left {
                return right;
            }
            if self == right {
                return left;
            }
        }
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerNum {
    First,
    Second,
}

impl PlayerNum {
    pub const ALL: [PlayerNum; 2] = [PlayerNum::First, PlayerNum::Second];

    pub fn index(self) -> usize {
        match self {
            PlayerNum::First => 0,
            PlayerNum::Second => 1,
        }
    }

    pub fn opponent(self) -> PlayerNum {
        match self {
            PlayerNum::First => PlayerNum::Second,
            PlayerNum::Second => PlayerNum::First,
        }
    }

    /// Single letter code: `t` for the top player, `b` for the bottom player.
    pub fn code(self) -> char {
        match self {
            PlayerNum::First => 't',
            PlayerNum::Second => 'b',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerJoint {
    pub player: PlayerNum,
    pub joint: Joint,
}

impl PlayerJoint {
    pub fn new(player: PlayerNum, joint: Joint) -> Self {
        Self { player, joint }
    }

    /// All 46 player joints, first player first.
    pub fn all() -> impl Iterator<Item = PlayerJoint> {
        PlayerNum::ALL.into_iter().flat_map(Self::of_player)
    }

    fn of_player(player: PlayerNum) -> [PlayerJoint; JOINT_COUNT] {
        Joint::ALL.map(|joint| Self { player, joint })
    }
}

/// One value per joint, indexed by [`Joint`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerJoint<T>(pub [T; JOINT_COUNT]);

impl<T: Copy> PerJoint<T> {
    pub fn splat(value: T) -> Self {
        Self([value; JOINT_COUNT])
    }

    pub fn map<U>(&self, f: impl FnMut(T) -> U) -> PerJoint<U> {
        PerJoint(self.0.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, T)> + '_ {
        Joint::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn swap(&mut self, a: Joint, b: Joint) {
        self.0.swap(a.index(), b.index());
    }
}

impl<T> Index<Joint> for PerJoint<T> {
    type Output = T;

    fn index(&self, joint: Joint) -> &T {
        &self.0[joint.index()]
    }
}

impl<T> IndexMut<Joint> for PerJoint<T> {
    fn index_mut(&mut self, joint: Joint) -> &mut T {
        &mut self.0[joint.index()]
    }
}
