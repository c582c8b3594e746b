use crate::domain::SeatIndex;

/// Все места по кругу начиная со `start`: start, start+1, ..., start−1.
pub fn seats_from(start: SeatIndex, n: usize) -> Vec<SeatIndex> {
    (0..n).map(|i| (start + i) % n).collect()
}

/// Места блайндов. Хедз-ап играется по стандартному правилу:
/// малый блайнд ставит баттон, большой — второй игрок.
pub fn blind_seats(button: SeatIndex, n: usize) -> (SeatIndex, SeatIndex) {
    if n == 2 {
        (button, (button + 1) % n)
    } else {
        ((button + 1) % n, (button + 2) % n)
    }
}

/// Порядок раздачи карманных карт: по одной, начиная с малого блайнда,
/// баттон получает последним.
pub fn deal_order(button: SeatIndex, n: usize) -> Vec<SeatIndex> {
    let (small_blind, _) = blind_seats(button, n);
    seats_from(small_blind, n)
}

/// Ринг префлопа: первым ходит сосед большого блайнда,
/// сам большой блайнд закрывает круг (и имеет опцию).
pub fn preflop_ring(button: SeatIndex, n: usize) -> Vec<SeatIndex> {
    let (_, big_blind) = blind_seats(button, n);
    seats_from((big_blind + 1) % n, n)
}

/// Ринг постфлопа: первым ходит первый активный по часовой стрелке
/// от баттона, сам баттон — последним.
pub fn postflop_ring(button: SeatIndex, n: usize) -> Vec<SeatIndex> {
    seats_from((button + 1) % n, n)
}
